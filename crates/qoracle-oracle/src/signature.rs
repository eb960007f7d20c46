//! Verification of a single reporter signature.

use qoracle_crypto::PqVerifier;
use qoracle_types::{PriceObservation, TrustedReporterKey, SIG_SIZE};

use crate::canonical::canonicalize;

/// Check one reporter's signature over `observation`.
///
/// Returns the verifier's answer unchanged. The canonical message buffer is
/// wiped before this function returns.
pub fn verify_observation<V: PqVerifier + ?Sized>(
    verifier: &V,
    key: &TrustedReporterKey,
    observation: &PriceObservation,
    signature: &[u8; SIG_SIZE],
) -> bool {
    let message = canonicalize(observation);
    let ok = verifier.verify(key.as_bytes(), message.as_ref(), signature);
    drop(message);
    ok
}
