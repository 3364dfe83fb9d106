//! The function marketplace.
//!
//! Owns the registry, the fee ledger and the invocation channel, and settles
//! paid invocations through a [`TransferPort`].
//!
//! Calls are synchronous and each one either commits fully or changes
//! nothing. `run_function` is the only multi-step operation; its order is:
//!
//! 1. Look up the function
//! 2. Plan the split and check the payment (exact match)
//! 3. Check the executor is listening and the fee ledger can absorb the fee
//! 4. Move value (owner share and fee, one atomic batch)
//! 5. Credit the fee ledger and emit the invocation request
//!
//! Every check that can fail runs before step 4, so a rejected call never
//! leaves a partial transfer or a partial fee behind.

use chrono::Utc;
use molt_registry::{AccountId, FunctionRecord, FunctionRegistry, PropertyKey, RegistrySnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::invocation::{self, InvocationReceiver, InvocationRequest, InvocationSender};
use crate::ledger::FeeLedger;
use crate::settlement::{SettlementPlan, SettlementReceipt, quote_price};
use crate::transfer::TransferPort;

/// A function record together with its quoted price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionListing {
    /// The stored record.
    #[serde(flatten)]
    pub record: FunctionRecord,
    /// `base_cost + service_fee`.
    pub price: u64,
}

/// Registry plus pricing and settlement.
#[derive(Debug)]
pub struct Marketplace<P> {
    registry: FunctionRegistry,
    ledger: FeeLedger,
    config: MarketConfig,
    transfer: P,
    invocations: InvocationSender,
}

impl<P: TransferPort> Marketplace<P> {
    /// Creates a marketplace with the default configuration.
    ///
    /// Returns the receiver the executor reads invocation requests from.
    pub fn new(transfer: P) -> (Self, InvocationReceiver) {
        Self::build(MarketConfig::default(), transfer)
    }

    /// Creates a marketplace with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Config` if the configuration is invalid.
    pub fn with_config(config: MarketConfig, transfer: P) -> Result<(Self, InvocationReceiver)> {
        config.validate()?;
        Ok(Self::build(config, transfer))
    }

    fn build(config: MarketConfig, transfer: P) -> (Self, InvocationReceiver) {
        let (invocations, receiver) = invocation::channel();
        debug!(
            service_fee = config.service_fee,
            platform = %config.platform_account,
            "marketplace created"
        );
        let market = Self {
            registry: FunctionRegistry::new(),
            ledger: FeeLedger::new(),
            config,
            transfer,
            invocations,
        };
        (market, receiver)
    }

    // =========================================================================
    // Registry operations
    // =========================================================================

    /// Registers a new function owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::DuplicateKey` if the name is taken, or
    /// `MarketError::InvalidValue` if the name is empty.
    pub fn create_function(
        &mut self,
        name: &str,
        description: &str,
        prototype: &str,
        remote_resource: &str,
        base_cost: u64,
        owner: AccountId,
    ) -> Result<()> {
        let record =
            FunctionRecord::build(name, description, prototype, remote_resource, base_cost, owner)?;
        self.registry.store(record)?;
        info!(name = %name, base_cost, "function created");
        Ok(())
    }

    /// All records in registration order.
    #[must_use]
    pub fn list_functions(&self) -> Vec<FunctionRecord> {
        self.registry.list()
    }

    /// All function names in registration order.
    #[must_use]
    pub fn list_function_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Looks up a function and quotes its price.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` if no function has this name.
    pub fn find_function(&self, name: &str) -> Result<FunctionListing> {
        let record = self.registry.find(name)?;
        let price = quote_price(record.base_cost, self.config.service_fee)?;
        Ok(FunctionListing {
            record: record.clone(),
            price,
        })
    }

    /// Quoted price of a function: `base_cost + service_fee`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` if no function has this name.
    pub fn cost_of(&self, name: &str) -> Result<u64> {
        let record = self.registry.find(name)?;
        let price = quote_price(record.base_cost, self.config.service_fee)?;
        debug!(name = %name, price, "price quoted");
        Ok(price)
    }

    /// Remote resource locator (ARN) of a function.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` if no function has this name.
    pub fn get_arn(&self, name: &str) -> Result<&str> {
        Ok(self.registry.find(name)?.remote_resource.as_str())
    }

    /// Updates one property of a function.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` if no function has this name, or
    /// `MarketError::InvalidValue` if the value does not parse.
    pub fn set_function_property(&mut self, name: &str, property: PropertyKey) -> Result<()> {
        self.registry.set_property(name, property)?;
        Ok(())
    }

    /// Updates one property of a function on behalf of `caller`.
    ///
    /// With `enforce_ownership` on, only the owner may do this.
    ///
    /// # Errors
    ///
    /// As [`Self::set_function_property`], plus `MarketError::NotOwner`.
    pub fn set_function_property_as(
        &mut self,
        name: &str,
        property: PropertyKey,
        caller: &AccountId,
    ) -> Result<()> {
        self.check_owner(name, caller)?;
        self.set_function_property(name, property)
    }

    /// Removes a function. The name may be registered again afterwards.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` if no function has this name.
    pub fn delete_function(&mut self, name: &str) -> Result<FunctionRecord> {
        Ok(self.registry.delete(name)?)
    }

    /// Removes a function on behalf of `caller`.
    ///
    /// With `enforce_ownership` on, only the owner may do this.
    ///
    /// # Errors
    ///
    /// As [`Self::delete_function`], plus `MarketError::NotOwner`.
    pub fn delete_function_as(&mut self, name: &str, caller: &AccountId) -> Result<FunctionRecord> {
        self.check_owner(name, caller)?;
        self.delete_function(name)
    }

    fn check_owner(&self, name: &str, caller: &AccountId) -> Result<()> {
        let record = self.registry.find(name)?;
        if self.config.enforce_ownership && &record.owner != caller {
            warn!(name = %name, caller = %caller, "mutation by non-owner rejected");
            return Err(MarketError::NotOwner {
                name: name.to_string(),
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Pays for and requests one invocation of a function.
    ///
    /// `supplied` must equal [`Self::cost_of`]. On success the owner receives
    /// the base cost, the platform retains the service fee, and an
    /// [`InvocationRequest`] is sent to the executor. On any error nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// - `MarketError::NotFound` if no function has this name
    /// - `MarketError::InsufficientPayment` if `supplied` is not the exact price
    /// - `MarketError::ExecutorUnavailable` if the invocation receiver was dropped
    /// - `MarketError::TransferFailure` if the host rejects the value movement
    ///
    /// The executor check happens before value moves. If the receiver lives on
    /// another thread and is dropped between that check and the send, the
    /// settlement stays committed, the request is lost, and the call still
    /// returns `Ok` (logged at `warn`).
    pub fn run_function(
        &mut self,
        name: &str,
        payload: &str,
        invocation_id: &str,
        supplied: u64,
        caller: &AccountId,
    ) -> Result<SettlementReceipt> {
        match self.settle(name, payload, invocation_id, supplied, caller) {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                warn!(
                    name = %name,
                    invocation_id = %invocation_id,
                    caller = %caller,
                    error = %e,
                    "settlement aborted"
                );
                Err(e)
            }
        }
    }

    fn settle(
        &mut self,
        name: &str,
        payload: &str,
        invocation_id: &str,
        supplied: u64,
        caller: &AccountId,
    ) -> Result<SettlementReceipt> {
        let record = self.registry.find(name)?;
        let plan = SettlementPlan::new(record, self.config.service_fee, supplied, caller)?;

        if self.invocations.is_closed() {
            return Err(MarketError::ExecutorUnavailable);
        }
        self.ledger.check_credit(plan.fee)?;

        self.transfer
            .move_batch(&plan.legs(&self.config.platform_account))?;

        // Committed: the fee fits (checked above) and nothing below can abort.
        self.ledger.credit(plan.fee)?;
        info!(
            name = %name,
            caller = %plan.caller,
            owner = %plan.owner,
            owner_share = plan.owner_share,
            fee = plan.fee,
            "settlement committed"
        );

        let request = InvocationRequest {
            function: plan.function.clone(),
            payload: payload.to_string(),
            invocation_id: invocation_id.to_string(),
            caller: plan.caller.clone(),
            requested_at: Utc::now(),
        };
        if self.invocations.send(request).is_err() {
            warn!(name = %name, invocation_id = %invocation_id, "executor went away after settlement");
        } else {
            debug!(name = %name, invocation_id = %invocation_id, "invocation request emitted");
        }

        Ok(plan.into_receipt(invocation_id))
    }

    /// Retained-fee balance of the platform.
    #[must_use]
    pub fn get_balance(&self) -> u64 {
        self.ledger.balance()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The fee ledger.
    #[must_use]
    pub fn ledger(&self) -> &FeeLedger {
        &self.ledger
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The transfer backend.
    #[must_use]
    pub fn transfer(&self) -> &P {
        &self.transfer
    }

    /// Mutable access to the transfer backend.
    pub fn transfer_mut(&mut self) -> &mut P {
        &mut self.transfer
    }

    /// Captures the registry as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.registry.snapshot()
    }

    /// Replaces the registry with the contents of a snapshot.
    ///
    /// The current registry is kept if the snapshot is invalid.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::DuplicateKey` or `MarketError::InvalidValue` if
    /// the snapshot violates the registry invariants.
    pub fn load_snapshot(&mut self, snapshot: RegistrySnapshot) -> Result<()> {
        self.registry = FunctionRegistry::restore(snapshot)?;
        info!(count = self.registry.len(), "registry loaded from snapshot");
        Ok(())
    }
}
