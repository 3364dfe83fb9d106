//! Integration test crate for the MOLT function marketplace.
//!
//! This crate exists solely to run integration tests that span the registry and
//! marketplace crates. It has no public API - all functionality is in the test modules.

#![forbid(unsafe_code)]
