//! Name-keyed, insertion-ordered function storage.
//!
//! Records live in a `Vec` so listing preserves insertion order; a name index
//! gives constant-time lookup. Deleting a record shifts later entries down and
//! keeps their relative order.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{RegistryError, Result};
use crate::property::PropertyKey;
use crate::record::FunctionRecord;

/// The function registry.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    records: Vec<FunctionRecord>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record at the end of the iteration order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateKey` if a record with the same name is
    /// already stored, or `RegistryError::InvalidValue` if the record is malformed.
    pub fn store(&mut self, record: FunctionRecord) -> Result<()> {
        record.validate()?;
        if self.index.contains_key(&record.name) {
            return Err(RegistryError::DuplicateKey(record.name));
        }

        debug!(
            name = %record.name,
            owner = %record.owner,
            base_cost = record.base_cost,
            "function stored"
        );
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Returns true if a record with this name is stored.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up a record by name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record has this name.
    pub fn find(&self, name: &str) -> Result<&FunctionRecord> {
        self.index
            .get(name)
            .map(|&pos| &self.records[pos])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Returns a snapshot of all records in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<FunctionRecord> {
        self.records.clone()
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionRecord> {
        self.records.iter()
    }

    /// Returns the stored names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Updates one mutable property of a record.
    ///
    /// The value is validated before the record is touched; on error the
    /// record is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record has this name, or
    /// `RegistryError::InvalidValue` if the value does not parse.
    pub fn set_property(&mut self, name: &str, property: PropertyKey) -> Result<()> {
        let pos = *self
            .index
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        let field = property.field();
        let update = property.validate()?;

        update.apply(&mut self.records[pos]);
        debug!(name = %name, field, "function property updated");
        Ok(())
    }

    /// Removes a record, keeping the order of the remaining ones.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record has this name.
    pub fn delete(&mut self, name: &str) -> Result<FunctionRecord> {
        let pos = self
            .index
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        let removed = self.records.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }

        info!(name = %removed.name, owner = %removed.owner, "function deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AccountId;

    fn record(name: &str, cost: u64) -> FunctionRecord {
        FunctionRecord::build(name, "description", "proto", "remote", cost, AccountId::new("bob"))
            .expect("valid record")
    }

    fn registry_with(names: &[&str]) -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        for name in names {
            registry.store(record(name, 2)).expect("store");
        }
        registry
    }

    // =========================================================================
    // Store / Exists / Find
    // =========================================================================

    #[test]
    fn new_registry_is_empty() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn store_then_find_returns_same_record() {
        let mut registry = FunctionRegistry::new();
        registry.store(record("test_sdd_fn", 2)).expect("store");

        let found = registry.find("test_sdd_fn").expect("found");
        assert_eq!(found, &record("test_sdd_fn", 2));
        assert!(registry.exists("test_sdd_fn"));
    }

    #[test]
    fn store_rejects_duplicate_name() {
        let mut registry = FunctionRegistry::new();
        registry.store(record("f", 2)).expect("first store");

        let result = registry.store(record("f", 99));
        assert_eq!(result, Err(RegistryError::DuplicateKey("f".to_string())));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("f").expect("found").base_cost, 2);
    }

    #[test]
    fn store_rejects_record_with_empty_name() {
        let mut registry = FunctionRegistry::new();
        let mut bad = record("f", 2);
        bad.name.clear();

        assert!(matches!(registry.store(bad), Err(RegistryError::InvalidValue(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn find_missing_is_not_found() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            registry.find("nope"),
            Err(RegistryError::NotFound("nope".to_string()))
        );
        assert!(!registry.exists("nope"));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let registry = registry_with(&["c", "a", "b"]);
        let names: Vec<_> = registry.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(registry.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn iter_walks_records_in_order() {
        let mut registry = registry_with(&["c", "a"]);
        registry
            .set_property("a", PropertyKey::Cost("9".into()))
            .expect("update");

        let costs: Vec<_> = registry.iter().map(|r| (r.name.as_str(), r.base_cost)).collect();
        assert_eq!(costs, vec![("c", 2), ("a", 9)]);
    }

    #[test]
    fn list_is_a_snapshot() {
        let mut registry = registry_with(&["a"]);
        let listed = registry.list();
        registry.store(record("b", 2)).expect("store");
        assert_eq!(listed.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    // =========================================================================
    // Set Property
    // =========================================================================

    #[test]
    fn set_property_updates_description() {
        let mut registry = registry_with(&["f"]);
        registry
            .set_property("f", PropertyKey::Description("bho".into()))
            .expect("update");
        assert_eq!(registry.find("f").expect("found").description, "bho");
    }

    #[test]
    fn set_property_updates_prototype_and_remote() {
        let mut registry = registry_with(&["f"]);
        registry
            .set_property("f", PropertyKey::Prototype("(a, b) -> c".into()))
            .expect("update");
        registry
            .set_property("f", PropertyKey::RemoteResource("arn:new".into()))
            .expect("update");

        let found = registry.find("f").expect("found");
        assert_eq!(found.prototype, "(a, b) -> c");
        assert_eq!(found.remote_resource, "arn:new");
    }

    #[test]
    fn set_property_parses_cost() {
        let mut registry = registry_with(&["f"]);
        registry
            .set_property("f", PropertyKey::Cost("15".into()))
            .expect("update");
        assert_eq!(registry.find("f").expect("found").base_cost, 15);
    }

    #[test]
    fn set_property_bad_cost_leaves_record_unchanged() {
        let mut registry = registry_with(&["f"]);
        let before = registry.find("f").expect("found").clone();

        let result = registry.set_property("f", PropertyKey::Cost("-3".into()));
        assert!(matches!(result, Err(RegistryError::InvalidValue(_))));
        assert_eq!(registry.find("f").expect("found"), &before);
    }

    #[test]
    fn set_property_missing_is_not_found() {
        let mut registry = FunctionRegistry::new();
        let result = registry.set_property("f", PropertyKey::Description("x".into()));
        assert_eq!(result, Err(RegistryError::NotFound("f".to_string())));
    }

    #[test]
    fn set_property_never_touches_owner_or_name() {
        let mut registry = registry_with(&["f"]);
        registry
            .set_property("f", PropertyKey::Description("x".into()))
            .expect("update");
        let found = registry.find("f").expect("found");
        assert_eq!(found.name, "f");
        assert_eq!(found.owner, AccountId::new("bob"));
    }

    // =========================================================================
    // Delete
    // =========================================================================

    #[test]
    fn delete_removes_record() {
        let mut registry = registry_with(&["f"]);
        let removed = registry.delete("f").expect("delete");

        assert_eq!(removed.name, "f");
        assert!(!registry.exists("f"));
        assert!(matches!(registry.find("f"), Err(RegistryError::NotFound(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut registry = registry_with(&["f"]);
        assert_eq!(
            registry.delete("g"),
            Err(RegistryError::NotFound("g".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn delete_preserves_order_and_lookup_of_remaining() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        registry.delete("b").expect("delete");

        assert_eq!(registry.names(), vec!["a", "c", "d"]);
        assert_eq!(registry.find("c").expect("found").name, "c");
        assert_eq!(registry.find("d").expect("found").name, "d");

        registry
            .set_property("d", PropertyKey::Cost("7".into()))
            .expect("update");
        assert_eq!(registry.find("d").expect("found").base_cost, 7);
        assert_eq!(registry.find("c").expect("found").base_cost, 2);
    }

    #[test]
    fn deleted_name_can_be_stored_again() {
        let mut registry = registry_with(&["f", "g"]);
        registry.delete("f").expect("delete");
        registry.store(record("f", 5)).expect("store again");

        assert_eq!(registry.names(), vec!["g", "f"]);
        assert_eq!(registry.find("f").expect("found").base_cost, 5);
    }
}
