//! Error types for molt-registry.

use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A record with this name is already stored.
    #[error("function already exists: {0}")]
    DuplicateKey(String),

    /// No record with this name is stored.
    #[error("function not found: {0}")]
    NotFound(String),

    /// A field value is malformed (empty name, unparsable or negative cost).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl RegistryError {
    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_display_names_function() {
        let err = RegistryError::DuplicateKey("resize".to_string());
        assert_eq!(err.to_string(), "function already exists: resize");
    }

    #[test]
    fn not_found_display_names_function() {
        let err = RegistryError::NotFound("missing".to_string());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn invalid_value_helper() {
        let err = RegistryError::invalid_value("cost must be a decimal integer");
        assert_eq!(
            err,
            RegistryError::InvalidValue("cost must be a decimal integer".to_string())
        );
    }
}
