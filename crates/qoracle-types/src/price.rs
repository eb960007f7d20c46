//! Price observations and signed update requests.

use serde::{Deserialize, Serialize};

use crate::reporter::ReporterSignature;

/// A single price observation attested by the reporter committee.
///
/// `price` is a fixed-point integer whose scale (`decimals`) belongs to the
/// consuming token. Only `price` and `timestamp` are covered by reporter
/// signatures; `decimals` travels alongside the signed payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Scaled price.
    pub price: u64,
    /// Number of decimal places in `price`.
    pub decimals: u8,
    /// Unix seconds.
    pub timestamp: u64,
}

impl PriceObservation {
    /// Create an observation.
    pub fn new(price: u64, decimals: u8, timestamp: u64) -> Self {
        Self {
            price,
            decimals,
            timestamp,
        }
    }

    /// The zero-price, zero-timestamp observation a committee starts from.
    pub fn genesis(decimals: u8) -> Self {
        Self {
            price: 0,
            decimals,
            timestamp: 0,
        }
    }
}

/// An observation plus the reporter signatures offered in support of it.
///
/// Signature order carries no meaning. Signer indices are untrusted claims;
/// the quorum validator range-checks and de-duplicates them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdateRequest {
    pub observation: PriceObservation,
    pub signatures: Vec<ReporterSignature>,
}

impl PriceUpdateRequest {
    /// Create a request.
    pub fn new(observation: PriceObservation, signatures: Vec<ReporterSignature>) -> Self {
        Self {
            observation,
            signatures,
        }
    }
}
