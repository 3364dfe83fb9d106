//! Registry snapshots.
//!
//! A snapshot is the registry as a single ordered table of records, encoded as
//! JSON. Restoring goes back through [`FunctionRegistry::store`], so a snapshot
//! with an empty or repeated name is rejected rather than loaded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::record::FunctionRecord;
use crate::registry::FunctionRegistry;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable form of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Format version.
    pub version: u32,
    /// Records in insertion order.
    pub functions: Vec<FunctionRecord>,
}

impl RegistrySnapshot {
    /// Encodes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Snapshot` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::Snapshot(e.to_string()))
    }

    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Snapshot` on malformed JSON or an unsupported version.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| RegistryError::Snapshot(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RegistryError::Snapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }
}

impl FunctionRegistry {
    /// Captures the registry contents in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            functions: self.list(),
        }
    }

    /// Rebuilds a registry from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateKey` or `RegistryError::InvalidValue` if
    /// the snapshot violates the registry invariants.
    pub fn restore(snapshot: RegistrySnapshot) -> Result<Self> {
        let mut registry = Self::new();
        for record in snapshot.functions {
            registry.store(record)?;
        }
        debug!(count = registry.len(), "registry restored from snapshot");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyKey;
    use crate::record::AccountId;

    fn record(name: &str) -> FunctionRecord {
        FunctionRecord::build(name, "d", "p", "r", 3, AccountId::new("bob")).expect("valid")
    }

    #[test]
    fn restore_preserves_order_and_fields() {
        let mut registry = FunctionRegistry::new();
        registry.store(record("b")).expect("store");
        registry.store(record("a")).expect("store");
        registry
            .set_property("a", PropertyKey::Cost("9".into()))
            .expect("update");

        let json = registry.snapshot().to_json().expect("encode");
        let restored =
            FunctionRegistry::restore(RegistrySnapshot::from_json(&json).expect("decode"))
                .expect("restore");

        assert_eq!(restored.names(), vec!["b", "a"]);
        assert_eq!(restored.find("a").expect("found").base_cost, 9);
        assert_eq!(restored.list(), registry.list());
    }

    #[test]
    fn restore_rejects_duplicate_names() {
        let snapshot = RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            functions: vec![record("f"), record("f")],
        };
        assert_eq!(
            FunctionRegistry::restore(snapshot).map(|r| r.len()),
            Err(RegistryError::DuplicateKey("f".to_string()))
        );
    }

    #[test]
    fn restore_rejects_empty_name() {
        let mut bad = record("f");
        bad.name = String::new();
        let snapshot = RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            functions: vec![bad],
        };
        assert!(matches!(
            FunctionRegistry::restore(snapshot),
            Err(RegistryError::InvalidValue(_))
        ));
    }

    #[test]
    fn from_json_rejects_unknown_version() {
        let json = r#"{"version": 7, "functions": []}"#;
        assert!(matches!(
            RegistrySnapshot::from_json(json),
            Err(RegistryError::Snapshot(_))
        ));
    }

    #[test]
    fn from_json_rejects_negative_cost() {
        let json = r#"{"version": 1, "functions": [
            {"name": "f", "description": "", "prototype": "", "remote_resource": "",
             "base_cost": -1, "owner": "bob"}
        ]}"#;
        assert!(matches!(
            RegistrySnapshot::from_json(json),
            Err(RegistryError::Snapshot(_))
        ));
    }
}
