//! Value movement between accounts.
//!
//! [`TransferPort`] is the seam to the host's atomic value-transfer primitive.
//! [`InMemoryLedger`] is a simulated backend with per-account balances, used
//! in development and tests.

use std::collections::{HashMap, HashSet};

use molt_registry::AccountId;
use thiserror::Error;
use tracing::debug;

/// Errors reported by a transfer backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The paying account cannot cover the batch.
    #[error("insufficient balance in {account}: have {available}, need {required}")]
    InsufficientBalance {
        /// The paying account.
        account: AccountId,
        /// Its current balance.
        available: u64,
        /// Total it would pay across the batch.
        required: u64,
    },

    /// The host refused the movement.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// One movement of value from one account to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLeg {
    /// Paying account.
    pub from: AccountId,
    /// Receiving account.
    pub to: AccountId,
    /// Amount moved.
    pub amount: u64,
}

impl TransferLeg {
    /// Creates a transfer leg.
    #[must_use]
    pub fn new(from: AccountId, to: AccountId, amount: u64) -> Self {
        Self { from, to, amount }
    }
}

/// Host-provided atomic value movement.
pub trait TransferPort {
    /// Applies every leg or none of them.
    ///
    /// # Errors
    ///
    /// Returns a `TransferError` if any leg cannot be applied; no balance
    /// changes in that case.
    fn move_batch(&mut self, legs: &[TransferLeg]) -> Result<(), TransferError>;

    /// Moves `amount` from one account to another.
    ///
    /// # Errors
    ///
    /// Returns a `TransferError` if the movement is refused.
    fn move_value(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), TransferError> {
        self.move_batch(&[TransferLeg::new(from.clone(), to.clone(), amount)])
    }
}

/// Simulated account balances.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<AccountId, u64>,
    frozen: HashSet<AccountId>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds funds to an account (saturating).
    pub fn credit(&mut self, account: &AccountId, amount: u64) {
        let balance = self.balances.entry(account.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
        debug!(account = %account, amount, "account credited");
    }

    /// Returns the balance of an account (zero if unknown).
    #[must_use]
    pub fn balance(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Makes every transfer touching `account` fail with `Rejected`.
    pub fn freeze(&mut self, account: &AccountId) {
        self.frozen.insert(account.clone());
    }

    /// Lifts a freeze.
    pub fn unfreeze(&mut self, account: &AccountId) {
        self.frozen.remove(account);
    }
}

impl TransferPort for InMemoryLedger {
    fn move_batch(&mut self, legs: &[TransferLeg]) -> Result<(), TransferError> {
        // Stage every leg on a copy of the touched balances, then commit.
        let mut staged: HashMap<AccountId, u64> = HashMap::new();
        let mut outgoing: HashMap<&AccountId, u64> = HashMap::new();

        for leg in legs {
            for account in [&leg.from, &leg.to] {
                if self.frozen.contains(account) {
                    return Err(TransferError::Rejected(format!("account {account} is frozen")));
                }
            }

            let sent = outgoing.entry(&leg.from).or_insert(0);
            *sent = sent.saturating_add(leg.amount);

            let from_balance = *staged
                .entry(leg.from.clone())
                .or_insert_with(|| self.balance(&leg.from));
            let Some(remaining) = from_balance.checked_sub(leg.amount) else {
                return Err(TransferError::InsufficientBalance {
                    account: leg.from.clone(),
                    available: self.balance(&leg.from),
                    required: *sent,
                });
            };
            staged.insert(leg.from.clone(), remaining);

            let to_balance = *staged
                .entry(leg.to.clone())
                .or_insert_with(|| self.balance(&leg.to));
            let credited = to_balance.checked_add(leg.amount).ok_or_else(|| {
                TransferError::Rejected(format!("balance overflow for {}", leg.to))
            })?;
            staged.insert(leg.to.clone(), credited);
        }

        self.balances.extend(staged);
        debug!(legs = legs.len(), "transfer batch applied");
        Ok(())
    }
}
