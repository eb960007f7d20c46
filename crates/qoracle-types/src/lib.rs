//! # qoracle-types
//!
//! Shared domain types used across the qoracle workspace: price observations,
//! reporter keys and signatures, protocol constants, and the checked 64-bit
//! arithmetic every balance and price computation goes through.

pub mod arith;
pub mod price;
pub mod reporter;

pub use arith::ArithmeticError;
pub use price::{PriceObservation, PriceUpdateRequest};
pub use reporter::{ReporterKeyError, ReporterKeySet, ReporterSignature, TrustedReporterKey};

/// Opaque 32-byte account identifier used by token ledgers.
pub type AccountId = [u8; 32];

/// Number of trusted reporters in an oracle committee.
pub const NUM_REPORTERS: usize = 7;

/// Minimum number of distinct valid reporter signatures (4-of-7).
pub const QUORUM_THRESHOLD: usize = 4;

/// Reporter public key size in bytes (Dilithium3).
pub const PUBKEY_SIZE: usize = 1472;

/// Reporter signature size in bytes (Dilithium3).
pub const SIG_SIZE: usize = 2701;

/// Size of the canonical signed payload: price (8 bytes LE) || timestamp (8 bytes LE).
pub const CANONICAL_MESSAGE_SIZE: usize = 16;

/// Smallest acceptable scaled price.
pub const MIN_PRICE: u64 = 1;

/// Largest acceptable scaled price (1e17).
pub const MAX_PRICE: u64 = 100_000_000_000_000_000;

/// Allowed distance, in seconds, between an observation timestamp and host time.
pub const MAX_TIMESTAMP_SKEW: u64 = 600;

/// Price scale used by the aggregate token system.
pub const AGGREGATE_PRICE_DECIMALS: u8 = 15;

/// Price scale used by the synthetic-asset token.
pub const SYNTHETIC_PRICE_DECIMALS: u8 = 8;

/// Default number of accepted observations retained in history.
pub const DEFAULT_MAX_HISTORY: usize = 1024;
