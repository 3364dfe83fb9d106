//! # molt-registry
//!
//! Registry of invocable functions for the MOLT function marketplace.
//!
//! This crate provides:
//!
//! - [`FunctionRecord`] - A registered job descriptor (name, description, prototype,
//!   remote resource, base cost, owner)
//! - [`FunctionRegistry`] - Insertion-ordered, name-keyed storage with unique names
//! - [`PropertyKey`] - Typed property updates, validated before mutation
//! - [`RegistrySnapshot`] - Ordered JSON table for persisting a registry
//! - [`utils`] - String and decimal helpers used for keys and property parsing
//!
//! ## Example
//!
//! ```rust
//! use molt_registry::{AccountId, FunctionRecord, FunctionRegistry, PropertyKey};
//!
//! # fn example() -> molt_registry::Result<()> {
//! let mut registry = FunctionRegistry::new();
//! let record = FunctionRecord::build("resize", "resize an image", "(url) -> url", "arn:aws:lambda:resize", 2, AccountId::new("bob"))?;
//! registry.store(record)?;
//!
//! registry.set_property("resize", PropertyKey::Cost("25".into()))?;
//! assert_eq!(registry.find("resize")?.base_cost, 25);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod property;
pub mod record;
pub mod registry;
pub mod snapshot;
pub mod utils;

pub use error::{RegistryError, Result};
pub use property::PropertyKey;
pub use record::{AccountId, FunctionRecord};
pub use registry::FunctionRegistry;
pub use snapshot::RegistrySnapshot;
