//! Quorum validation of price updates.
//!
//! [`validate_update`] runs every gate in a fixed order and stops at the
//! first failure. It never mutates anything; committing an accepted update
//! is the committee's job.
//!
//! 1. At least [`QUORUM_THRESHOLD`] signatures supplied.
//! 2. Scan signatures: skip indices outside `0..NUM_REPORTERS`, skip indices
//!    already seen in this request, verify the rest against the trusted key.
//! 3. At least [`QUORUM_THRESHOLD`] distinct reporters verified.
//! 4. `timestamp > last_accepted.timestamp`.
//! 5. `timestamp <= now + MAX_TIMESTAMP_SKEW`.
//! 6. `timestamp + MAX_TIMESTAMP_SKEW >= now`, only when `now > 0`.
//! 7. `MIN_PRICE <= price <= MAX_PRICE`.
//!
//! Step 1 is a cheap early-out; step 3 is the authoritative count after
//! padding, duplicates, and bad signatures have been filtered.

use qoracle_crypto::PqVerifier;
use qoracle_types::arith::safe_add;
use qoracle_types::{
    PriceObservation, PriceUpdateRequest, ReporterKeySet, MAX_PRICE, MAX_TIMESTAMP_SKEW,
    MIN_PRICE, NUM_REPORTERS, QUORUM_THRESHOLD,
};

use crate::committee::CommitteeState;
use crate::signature::verify_observation;
use crate::ValidationError;

/// Run the full acceptance pipeline for `request` against `state`.
///
/// `now` is host time in Unix seconds; `0` means the host clock is unknown,
/// which disables the backward skew check.
///
/// # Errors
///
/// The first [`ValidationError`] hit, in pipeline order.
pub fn validate_update<V: PqVerifier + ?Sized>(
    state: &CommitteeState,
    request: &PriceUpdateRequest,
    now: u64,
    verifier: &V,
) -> Result<(), ValidationError> {
    check_signature_count(request)?;

    let valid = count_valid_signatures(state.trusted_keys(), request, verifier);
    if valid < QUORUM_THRESHOLD {
        return Err(ValidationError::InsufficientValidSignatures {
            required: QUORUM_THRESHOLD,
            valid,
        });
    }

    check_monotonic(&request.observation, state.last_accepted())?;
    check_skew(request.observation.timestamp, now)?;
    check_price_bounds(request.observation.price)?;
    Ok(())
}

/// Step 1: enough signatures supplied at all.
pub fn check_signature_count(request: &PriceUpdateRequest) -> Result<(), ValidationError> {
    if request.signatures.len() < QUORUM_THRESHOLD {
        return Err(ValidationError::InsufficientSignatureCount {
            required: QUORUM_THRESHOLD,
            provided: request.signatures.len(),
        });
    }
    Ok(())
}

/// Step 2: number of distinct in-range reporters whose signature verifies.
///
/// Out-of-range and repeated signer indices are skipped without verifying.
/// A repeated index is skipped even if its first signature was invalid.
pub fn count_valid_signatures<V: PqVerifier + ?Sized>(
    keys: &ReporterKeySet,
    request: &PriceUpdateRequest,
    verifier: &V,
) -> usize {
    let mut seen = [false; NUM_REPORTERS];
    let mut valid = 0usize;

    for sig in &request.signatures {
        let Some((slot, key)) = keys.resolve(sig.signer_index) else {
            tracing::trace!(signer_index = sig.signer_index, "skipping out-of-range signer");
            continue;
        };
        if seen[slot] {
            tracing::trace!(signer_index = sig.signer_index, "skipping duplicate signer");
            continue;
        }
        seen[slot] = true;

        if verify_observation(verifier, key, &request.observation, &sig.signature) {
            valid += 1;
        } else {
            tracing::trace!(signer_index = sig.signer_index, "signature did not verify");
        }
    }

    valid
}

/// Step 4: strictly newer than the last accepted observation.
pub fn check_monotonic(
    observation: &PriceObservation,
    last_accepted: &PriceObservation,
) -> Result<(), ValidationError> {
    if observation.timestamp <= last_accepted.timestamp {
        return Err(ValidationError::NonMonotonicTimestamp {
            new: observation.timestamp,
            last: last_accepted.timestamp,
        });
    }
    Ok(())
}

/// Steps 5 and 6: within [`MAX_TIMESTAMP_SKEW`] of host time.
///
/// The backward leg is skipped while `now == 0` (clock unknown).
pub fn check_skew(timestamp: u64, now: u64) -> Result<(), ValidationError> {
    // An overflowing bound lies beyond every u64 timestamp, so it cannot be exceeded.
    if let Ok(latest) = safe_add(now, MAX_TIMESTAMP_SKEW) {
        if timestamp > latest {
            return Err(ValidationError::ForwardSkewExceeded { timestamp, now });
        }
    }

    if now > 0 {
        if let Ok(reach) = safe_add(timestamp, MAX_TIMESTAMP_SKEW) {
            if reach < now {
                return Err(ValidationError::BackwardSkewExceeded { timestamp, now });
            }
        }
    }
    Ok(())
}

/// Step 7: price within `[MIN_PRICE, MAX_PRICE]`.
pub fn check_price_bounds(price: u64) -> Result<(), ValidationError> {
    if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(ValidationError::PriceOutOfBounds(price));
    }
    Ok(())
}
