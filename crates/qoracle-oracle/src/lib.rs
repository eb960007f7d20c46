//! # qoracle-oracle
//!
//! Oracle price-consensus engine.
//!
//! A price observation is accepted only when at least [`QUORUM_THRESHOLD`] of
//! the [`NUM_REPORTERS`] trusted reporters have signed it, its timestamp moves
//! strictly forward and sits within [`MAX_TIMESTAMP_SKEW`] of host time, and
//! its price lies in `[MIN_PRICE, MAX_PRICE]`. Accepted observations replace
//! the committee's current price and are appended to a bounded history.
//!
//! Each consuming token owns its own [`OracleCommittee`]; nothing is shared
//! between instances. Seeding every instance with the same reporter keys is
//! an operational requirement of whoever initializes them.
//!
//! ## Modules
//!
//! - [`canonical`]: the 16-byte signed payload
//! - [`signature`]: single-signature verification
//! - [`quorum`]: the full acceptance pipeline
//! - [`history`]: bounded FIFO of accepted observations
//! - [`committee`]: committee state and entry points
//! - [`circuit_breaker`]: emergency pause and staleness detection
//! - [`config`]: committee configuration
//!
//! [`QUORUM_THRESHOLD`]: qoracle_types::QUORUM_THRESHOLD
//! [`NUM_REPORTERS`]: qoracle_types::NUM_REPORTERS
//! [`MAX_TIMESTAMP_SKEW`]: qoracle_types::MAX_TIMESTAMP_SKEW

pub mod canonical;
pub mod circuit_breaker;
pub mod committee;
pub mod config;
pub mod history;
pub mod quorum;
pub mod signature;

pub use committee::{CommitteeState, OracleCommittee, ValidatedUpdate};
pub use config::CommitteeConfig;

/// Reasons a price update is rejected by the acceptance pipeline.
///
/// Callers of the boolean entry points only see `false`; these variants exist
/// so the reason is observable in logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Fewer signatures were supplied than the quorum requires.
    #[error("insufficient signatures: need {required}, got {provided}")]
    InsufficientSignatureCount {
        /// Quorum threshold.
        required: usize,
        /// Signatures in the request, before filtering.
        provided: usize,
    },

    /// Too few distinct in-range reporters produced a valid signature.
    #[error("insufficient valid signatures: need {required}, have {valid}")]
    InsufficientValidSignatures {
        /// Quorum threshold.
        required: usize,
        /// Distinct reporters whose signature verified.
        valid: usize,
    },

    /// Observation timestamp does not move past the last accepted one.
    #[error("non-monotonic timestamp: {new} <= {last}")]
    NonMonotonicTimestamp {
        /// The rejected timestamp.
        new: u64,
        /// The last accepted timestamp.
        last: u64,
    },

    /// Observation claims to be further in the future than the skew allows.
    #[error("timestamp {timestamp} too far ahead of host time {now}")]
    ForwardSkewExceeded {
        /// The rejected timestamp.
        timestamp: u64,
        /// Host time of the check.
        now: u64,
    },

    /// Observation is older than the skew allows.
    #[error("timestamp {timestamp} too far behind host time {now}")]
    BackwardSkewExceeded {
        /// The rejected timestamp.
        timestamp: u64,
        /// Host time of the check.
        now: u64,
    },

    /// Price outside `[MIN_PRICE, MAX_PRICE]`.
    #[error("price out of bounds: {0}")]
    PriceOutOfBounds(u64),
}

/// Error types for oracle operations.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The update failed the acceptance pipeline.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No committee state exists yet.
    #[error("oracle committee not initialized")]
    NotInitialized,

    /// `initialize` was called on an initialized committee.
    #[error("oracle committee already initialized")]
    AlreadyInitialized,

    /// The oracle is paused via the circuit breaker.
    #[error("oracle is paused")]
    Paused,

    /// The last accepted price is older than the staleness threshold.
    #[error(
        "oracle data is stale: last update {last_update}, current {current}, threshold {threshold}"
    )]
    StaleData {
        /// Timestamp of the last accepted observation.
        last_update: u64,
        /// Host time of the check.
        current: u64,
        /// Staleness threshold in seconds.
        threshold: u64,
    },

    /// A validated update was committed after another update moved the
    /// committee past the state it was validated against.
    #[error("validated against timestamp {validated_against}, committee is now at {current}")]
    StaleValidation {
        /// `last_accepted.timestamp` when the update was validated.
        validated_against: u64,
        /// `last_accepted.timestamp` at commit time.
        current: u64,
    },

    /// A validated update was committed to a committee other than the one
    /// that validated it.
    #[error("update validated by key set {validated_by}, committee key set is {current}")]
    ForeignValidation {
        /// Short fingerprint of the validating committee's key set.
        validated_by: String,
        /// Short fingerprint of this committee's key set.
        current: String,
    },

    /// No observation has been accepted since initialization.
    #[error("no price has been accepted yet")]
    NoPrice,

    /// Invalid committee configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;
