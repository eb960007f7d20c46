//! # qoracle-crypto
//!
//! Cryptographic boundary for the qoracle price-consensus engine.
//!
//! The post-quantum signature scheme used by reporters is provided by the host
//! environment and is not implemented here. This crate defines the interface
//! the engine calls through, plus the hashing helpers used around it.
//!
//! ## Modules
//!
//! - [`pq`]: the [`PqVerifier`](pq::PqVerifier) boundary and a host-function adapter
//! - [`blake3`]: domain-separated BLAKE3 hashing and key fingerprints
//! - `mock`: deterministic stand-in scheme for tests (feature `test-utils`)

pub mod blake3;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod pq;

pub use pq::{FnVerifier, PqVerifier};
