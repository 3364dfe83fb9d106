//! Marketplace configuration.
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! service_fee = 10
//! platform_account = "molt-platform"
//! enforce_ownership = true
//! ```

use std::path::Path;

use molt_registry::AccountId;
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// Default flat fee added to every quote.
pub const DEFAULT_SERVICE_FEE: u64 = 10;

/// Default account receiving retained fees.
pub const DEFAULT_PLATFORM_ACCOUNT: &str = "molt-platform";

/// Configuration for a marketplace instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Flat fee added to every function's base cost.
    pub service_fee: u64,
    /// Account that receives the fee leg of every settlement.
    pub platform_account: AccountId,
    /// Whether the `_as` mutation entry points reject non-owners.
    pub enforce_ownership: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            service_fee: DEFAULT_SERVICE_FEE,
            platform_account: AccountId::new(DEFAULT_PLATFORM_ACCOUNT),
            enforce_ownership: false,
        }
    }
}

impl MarketConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MarketError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| MarketError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.platform_account.as_str().is_empty() {
            return Err(MarketError::Config(
                "platform_account cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
