//! Function records and account identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Identifier of an account that can own functions and move value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A registered invocable function.
///
/// `name` and `owner` are fixed once the record is built; the registry only
/// ever mutates `description`, `prototype`, `remote_resource` and `base_cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Unique key of the function.
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// Invocation signature description.
    pub prototype: String,
    /// Opaque locator of the remote resource (ARN).
    pub remote_resource: String,
    /// Owner-set price, excluding the service fee.
    pub base_cost: u64,
    /// Account that registered the function and receives its base cost.
    pub owner: AccountId,
}

impl FunctionRecord {
    /// Builds a record, validating its fields.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidValue` if `name` is empty.
    pub fn build(
        name: impl Into<String>,
        description: impl Into<String>,
        prototype: impl Into<String>,
        remote_resource: impl Into<String>,
        base_cost: u64,
        owner: AccountId,
    ) -> Result<Self> {
        let record = Self {
            name: name.into(),
            description: description.into(),
            prototype: prototype.into(),
            remote_resource: remote_resource.into(),
            base_cost,
            owner,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks the record invariants.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RegistryError::invalid_value("function name cannot be empty"));
        }
        Ok(())
    }
}
