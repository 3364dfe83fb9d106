//! Platform fee ledger.
//!
//! Holds the fees retained by the marketplace. The balance only grows, and
//! only through settlement; there is no withdrawal path.

use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// Retained-fee balance of the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLedger {
    balance: u64,
    settlements: u64,
}

impl FeeLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balance: 0,
            settlements: 0,
        }
    }

    /// Current retained-fee balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Number of settlements credited so far.
    #[must_use]
    pub const fn settlements(&self) -> u64 {
        self.settlements
    }

    /// Checks that `fee` can be credited without overflow.
    pub(crate) fn check_credit(&self, fee: u64) -> Result<()> {
        self.balance
            .checked_add(fee)
            .map(|_| ())
            .ok_or_else(|| MarketError::InvalidValue("fee ledger overflow".to_string()))
    }

    /// Credits the fee of one settlement.
    pub(crate) fn credit(&mut self, fee: u64) -> Result<()> {
        self.check_credit(fee)?;
        self.balance += fee;
        self.settlements = self.settlements.saturating_add(1);
        Ok(())
    }
}
