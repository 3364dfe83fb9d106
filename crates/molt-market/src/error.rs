//! Error types for molt-market.

use molt_registry::{AccountId, RegistryError};
use thiserror::Error;

use crate::transfer::TransferError;

/// Result type alias for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors that can occur in marketplace operations.
///
/// Every failed call leaves the registry, the fee ledger and all account
/// balances exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// A function with this name is already registered.
    #[error("function already exists: {0}")]
    DuplicateKey(String),

    /// No function with this name is registered.
    #[error("function not found: {0}")]
    NotFound(String),

    /// Malformed input (empty name, unparsable cost, arithmetic overflow).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Supplied value does not match the quoted price.
    #[error("insufficient payment: required {required}, supplied {supplied}")]
    InsufficientPayment {
        /// Quoted price (`base_cost + service_fee`).
        required: u64,
        /// Value supplied by the caller.
        supplied: u64,
    },

    /// The host rejected the value movement.
    #[error("transfer failed: {0}")]
    TransferFailure(String),

    /// Nothing is consuming invocation requests.
    #[error("invocation executor unavailable")]
    ExecutorUnavailable,

    /// Caller is not the owner of the function.
    #[error("{caller} does not own function {name}")]
    NotOwner {
        /// Function name.
        name: String,
        /// Account that attempted the mutation.
        caller: AccountId,
    },

    /// Registry snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<RegistryError> for MarketError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::DuplicateKey(name) => Self::DuplicateKey(name),
            RegistryError::NotFound(name) => Self::NotFound(name),
            RegistryError::InvalidValue(reason) => Self::InvalidValue(reason),
            RegistryError::Snapshot(reason) => Self::Snapshot(reason),
        }
    }
}

impl From<TransferError> for MarketError {
    fn from(e: TransferError) -> Self {
        Self::TransferFailure(e.to_string())
    }
}
