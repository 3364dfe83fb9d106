//! # molt-market
//!
//! Function marketplace for the MOLT network.
//!
//! Wraps a [`molt_registry::FunctionRegistry`] and adds:
//!
//! - Price quotes (`base_cost + service_fee`)
//! - Exact-match payment validation
//! - Atomic settlement through a host-provided [`TransferPort`]
//! - A fee ledger for the platform's retained fees
//! - Hand-off of invocation requests to an external executor
//!
//! ## Example
//!
//! ```rust
//! use molt_market::{InMemoryLedger, Marketplace};
//! use molt_registry::AccountId;
//!
//! # fn example() -> molt_market::Result<()> {
//! let bob = AccountId::new("bob");
//! let alice = AccountId::new("alice");
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.credit(&alice, 100);
//!
//! let (mut market, mut invocations) = Marketplace::new(ledger);
//! market.create_function("f", "d", "p", "r", 2, bob.clone())?;
//!
//! let price = market.cost_of("f")?;
//! market.run_function("f", "{}", "call-1", price, &alice)?;
//!
//! assert_eq!(market.transfer().balance(&bob), 2);
//! assert_eq!(market.get_balance(), 10);
//! assert_eq!(invocations.try_recv().map(|r| r.function).ok(), Some("f".to_string()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod invocation;
pub mod ledger;
pub mod marketplace;
pub mod settlement;
pub mod transfer;

pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use invocation::{InvocationReceiver, InvocationRequest};
pub use ledger::FeeLedger;
pub use marketplace::{FunctionListing, Marketplace};
pub use settlement::{SettlementPlan, SettlementReceipt, quote_price};
pub use transfer::{InMemoryLedger, TransferError, TransferLeg, TransferPort};
