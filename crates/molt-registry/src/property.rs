//! Typed property updates for function records.
//!
//! A [`PropertyKey`] carries the raw value for the field it targets. It is
//! validated into an update before the record is touched, so a rejected
//! update never leaves a record half-modified.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::record::FunctionRecord;
use crate::utils::string_to_uint;

/// A mutable property of a function record, with its raw new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum PropertyKey {
    /// Replace the description verbatim.
    Description(String),
    /// Replace the prototype verbatim.
    Prototype(String),
    /// Replace the remote resource locator verbatim.
    RemoteResource(String),
    /// Replace the base cost; the raw value must be a non-negative decimal integer.
    Cost(String),
}

impl PropertyKey {
    /// Builds a property update from a string key and raw value.
    ///
    /// Keys are matched case-insensitively; `remote_resource`, `remoteresource`
    /// and `remote-resource` are all accepted.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidValue` for an unknown key.
    pub fn from_parts(key: &str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match key.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "description" => Ok(Self::Description(value)),
            "prototype" => Ok(Self::Prototype(value)),
            "remoteresource" => Ok(Self::RemoteResource(value)),
            "cost" => Ok(Self::Cost(value)),
            _ => Err(RegistryError::InvalidValue(format!(
                "unknown property: {key}"
            ))),
        }
    }

    /// Returns the canonical name of the targeted field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Description(_) => "description",
            Self::Prototype(_) => "prototype",
            Self::RemoteResource(_) => "remote_resource",
            Self::Cost(_) => "cost",
        }
    }

    /// Validates the raw value into an update that cannot fail to apply.
    pub(crate) fn validate(self) -> Result<PropertyUpdate> {
        match self {
            Self::Description(v) => Ok(PropertyUpdate::Description(v)),
            Self::Prototype(v) => Ok(PropertyUpdate::Prototype(v)),
            Self::RemoteResource(v) => Ok(PropertyUpdate::RemoteResource(v)),
            Self::Cost(raw) => string_to_uint(&raw).map(PropertyUpdate::Cost).ok_or_else(|| {
                RegistryError::InvalidValue(format!(
                    "cost must be a non-negative decimal integer, got {raw:?}"
                ))
            }),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// A validated property update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PropertyUpdate {
    Description(String),
    Prototype(String),
    RemoteResource(String),
    Cost(u64),
}

impl PropertyUpdate {
    pub(crate) fn apply(self, record: &mut FunctionRecord) {
        match self {
            Self::Description(v) => record.description = v,
            Self::Prototype(v) => record.prototype = v,
            Self::RemoteResource(v) => record.remote_resource = v,
            Self::Cost(v) => record.base_cost = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AccountId;
    use test_case::test_case;

    fn record() -> FunctionRecord {
        FunctionRecord::build("f", "d", "p", "r", 20, AccountId::new("bob")).expect("valid")
    }

    #[test_case("description", "description" ; "lowercase")]
    #[test_case("Description", "description" ; "capitalised")]
    #[test_case("prototype", "prototype" ; "prototype")]
    #[test_case("remoteResource", "remote_resource" ; "camel case")]
    #[test_case("remote_resource", "remote_resource" ; "snake case")]
    #[test_case("remote-resource", "remote_resource" ; "kebab case")]
    #[test_case("COST", "cost" ; "uppercase")]
    fn from_parts_resolves_field(key: &str, field: &str) {
        let property = PropertyKey::from_parts(key, "x").expect("known key");
        assert_eq!(property.field(), field);
    }

    #[test]
    fn from_parts_rejects_unknown_key() {
        let result = PropertyKey::from_parts("owner", "mallory");
        assert!(matches!(result, Err(RegistryError::InvalidValue(_))));
    }

    #[test]
    fn string_values_are_applied_verbatim() {
        let mut rec = record();
        PropertyKey::Description("  spaced  ".into())
            .validate()
            .expect("valid")
            .apply(&mut rec);
        assert_eq!(rec.description, "  spaced  ");
    }

    #[test_case("15", 15 ; "plain")]
    #[test_case("0", 0 ; "zero")]
    #[test_case("0025", 25 ; "leading zeros")]
    fn cost_is_parsed(raw: &str, expected: u64) {
        let mut rec = record();
        PropertyKey::Cost(raw.into()).validate().expect("valid").apply(&mut rec);
        assert_eq!(rec.base_cost, expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("-1" ; "negative")]
    #[test_case("abc" ; "letters")]
    #[test_case("1e3" ; "exponent")]
    fn bad_cost_is_rejected(raw: &str) {
        let result = PropertyKey::Cost(raw.into()).validate();
        assert!(matches!(result, Err(RegistryError::InvalidValue(_))));
    }

    #[test]
    fn serde_uses_tagged_form() {
        let property = PropertyKey::Cost("25".into());
        let json = serde_json::to_string(&property).expect("serialize");
        assert_eq!(json, r#"{"key":"cost","value":"25"}"#);
        let back: PropertyKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, property);
    }
}
