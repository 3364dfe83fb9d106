//! Pricing and settlement planning.
//!
//! Settling an invocation splits the caller's payment in two:
//!
//! - **Owner share**: the function's `base_cost`, forwarded to its owner
//! - **Service fee**: the flat platform fee, retained by the marketplace
//!
//! The quoted price is `base_cost + service_fee`. Payment is exact-match:
//! under- and over-payment are both rejected. All arithmetic is checked; a
//! price that would not fit in a `u64` is an `InvalidValue`, never a wrap.
//!
//! Planning is pure. The marketplace turns a [`SettlementPlan`] into transfer
//! legs and commits it; nothing here touches balances.

use molt_registry::{AccountId, FunctionRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MarketError, Result};
use crate::transfer::TransferLeg;

/// Quoted price of a function: `base_cost + service_fee`.
///
/// # Errors
///
/// Returns `MarketError::InvalidValue` if the sum overflows.
///
/// # Examples
/// ```
/// use molt_market::quote_price;
///
/// assert_eq!(quote_price(2, 10).unwrap(), 12);
/// assert!(quote_price(u64::MAX, 1).is_err());
/// ```
pub fn quote_price(base_cost: u64, service_fee: u64) -> Result<u64> {
    base_cost.checked_add(service_fee).ok_or_else(|| {
        MarketError::InvalidValue(format!(
            "price overflow: base cost {base_cost} + service fee {service_fee}"
        ))
    })
}

/// A validated split of one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Function being paid for.
    pub function: String,
    /// Paying account.
    pub caller: AccountId,
    /// Function owner.
    pub owner: AccountId,
    /// Amount forwarded to the owner.
    pub owner_share: u64,
    /// Amount retained by the platform.
    pub fee: u64,
    /// Total charged to the caller.
    pub total: u64,
}

impl SettlementPlan {
    /// Plans the settlement of one invocation.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InsufficientPayment` unless `supplied` equals the
    /// quoted price, or `MarketError::InvalidValue` if the price overflows.
    pub fn new(
        record: &FunctionRecord,
        service_fee: u64,
        supplied: u64,
        caller: &AccountId,
    ) -> Result<Self> {
        let required = quote_price(record.base_cost, service_fee)?;
        if supplied != required {
            return Err(MarketError::InsufficientPayment { required, supplied });
        }

        Ok(Self {
            function: record.name.clone(),
            caller: caller.clone(),
            owner: record.owner.clone(),
            owner_share: record.base_cost,
            fee: service_fee,
            total: required,
        })
    }

    /// Transfer legs that carry out this plan: owner share first, then fee.
    #[must_use]
    pub fn legs(&self, platform: &AccountId) -> [TransferLeg; 2] {
        [
            TransferLeg::new(self.caller.clone(), self.owner.clone(), self.owner_share),
            TransferLeg::new(self.caller.clone(), platform.clone(), self.fee),
        ]
    }

    /// Receipt for a committed plan.
    #[must_use]
    pub fn into_receipt(self, invocation_id: &str) -> SettlementReceipt {
        SettlementReceipt {
            settlement_id: Uuid::new_v4().to_string(),
            function: self.function,
            invocation_id: invocation_id.to_string(),
            caller: self.caller,
            owner: self.owner,
            owner_share: self.owner_share,
            fee: self.fee,
            total_charged: self.total,
        }
    }
}

/// Record of a committed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Unique identifier of this settlement.
    pub settlement_id: String,
    /// Function paid for.
    pub function: String,
    /// Caller-chosen invocation identifier.
    pub invocation_id: String,
    /// Paying account.
    pub caller: AccountId,
    /// Receiving owner.
    pub owner: AccountId,
    /// Amount forwarded to the owner.
    pub owner_share: u64,
    /// Amount retained by the platform.
    pub fee: u64,
    /// Total charged to the caller.
    pub total_charged: u64,
}
