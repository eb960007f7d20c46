//! Post-quantum signature verification boundary.
//!
//! Reporters sign with a Dilithium3-class scheme whose verification routine
//! is supplied by the host. The engine only ever sees it through
//! [`PqVerifier`]; the routine is assumed correct and constant-time.

use qoracle_types::{PUBKEY_SIZE, SIG_SIZE};

/// Verifies one signature over a message with one public key.
pub trait PqVerifier {
    /// Return `true` iff `signature` is valid for `message` under `public_key`.
    fn verify(
        &self,
        public_key: &[u8; PUBKEY_SIZE],
        message: &[u8],
        signature: &[u8; SIG_SIZE],
    ) -> bool;
}

impl<V: PqVerifier + ?Sized> PqVerifier for &V {
    fn verify(
        &self,
        public_key: &[u8; PUBKEY_SIZE],
        message: &[u8],
        signature: &[u8; SIG_SIZE],
    ) -> bool {
        (**self).verify(public_key, message, signature)
    }
}

/// Signature of the host's verification routine:
/// `(public_key, message, message_length, signature) -> valid`.
pub type HostVerifyFn = fn(&[u8; PUBKEY_SIZE], &[u8], u64, &[u8; SIG_SIZE]) -> bool;

/// Adapts a host-provided verification function to [`PqVerifier`].
#[derive(Clone, Copy)]
pub struct FnVerifier {
    verify_fn: HostVerifyFn,
}

impl FnVerifier {
    /// Wrap a host verification function.
    pub fn new(verify_fn: HostVerifyFn) -> Self {
        Self { verify_fn }
    }
}

impl PqVerifier for FnVerifier {
    fn verify(
        &self,
        public_key: &[u8; PUBKEY_SIZE],
        message: &[u8],
        signature: &[u8; SIG_SIZE],
    ) -> bool {
        // usize -> u64 is lossless on every supported target.
        (self.verify_fn)(public_key, message, message.len() as u64, signature)
    }
}

impl std::fmt::Debug for FnVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept_16_byte_messages(
        _pk: &[u8; PUBKEY_SIZE],
        message: &[u8],
        len: u64,
        _sig: &[u8; SIG_SIZE],
    ) -> bool {
        len == 16 && message.len() == 16
    }

    #[test]
    fn test_fn_verifier_passes_length() {
        let verifier = FnVerifier::new(accept_16_byte_messages);
        let pk = [0u8; PUBKEY_SIZE];
        let sig = [0u8; SIG_SIZE];
        assert!(verifier.verify(&pk, &[0u8; 16], &sig));
        assert!(!verifier.verify(&pk, &[0u8; 15], &sig));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let verifier = FnVerifier::new(accept_16_byte_messages);
        let by_ref: &dyn PqVerifier = &verifier;
        assert!(by_ref.verify(&[0u8; PUBKEY_SIZE], &[0u8; 16], &[0u8; SIG_SIZE]));
    }
}
