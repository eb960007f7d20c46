//! Integration test crate for the qoracle price-consensus engine.
//!
//! This crate has no library code. Its tests drive reporter-signed updates
//! through the committee and the synthetic token across crate boundaries,
//! using the deterministic mock reporter scheme.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p qoracle-integration-tests
//! ```
