//! Deterministic stand-in for the reporters' post-quantum scheme.
//!
//! Keys and signatures have the real Dilithium3 sizes but are derived with
//! BLAKE3, so tests and tooling can produce verifiable signatures without the
//! host primitive. Anyone holding a public key can forge signatures for it:
//! this module only exists under `cfg(test)` or the `test-utils` feature.

use std::cell::Cell;

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use qoracle_types::{PUBKEY_SIZE, SIG_SIZE};

use crate::blake3::{self, contexts};
use crate::pq::PqVerifier;

/// A mock reporter signing key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MockSigner {
    seed: [u8; 32],
}

impl MockSigner {
    /// Create a signer from a fixed seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self { seed }
    }

    /// Create a signer from a random seed.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        Self { seed }
    }

    /// The public key matching this signer.
    pub fn public_key(&self) -> [u8; PUBKEY_SIZE] {
        let mut key_seed = blake3::derive_key(contexts::MOCK_REPORTER_KEYGEN, &self.seed);
        let mut public_key = [0u8; PUBKEY_SIZE];
        blake3::hash_xof(&key_seed, &mut public_key);
        key_seed.zeroize();
        public_key
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIG_SIZE] {
        expand_signature(&self.public_key(), message)
    }
}

impl std::fmt::Debug for MockSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSigner")
            .field("public", &blake3::short_fingerprint(&self.public_key()))
            .finish()
    }
}

fn expand_signature(public_key: &[u8; PUBKEY_SIZE], message: &[u8]) -> [u8; SIG_SIZE] {
    let mac_key = blake3::derive_key(contexts::MOCK_REPORTER_SIGNATURE, public_key);
    let tag = blake3::keyed_hash(&mac_key, message);
    let mut signature = [0u8; SIG_SIZE];
    blake3::hash_xof(&tag, &mut signature);
    signature
}

/// Verifier for [`MockSigner`] signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockVerifier;

impl PqVerifier for MockVerifier {
    fn verify(
        &self,
        public_key: &[u8; PUBKEY_SIZE],
        message: &[u8],
        signature: &[u8; SIG_SIZE],
    ) -> bool {
        expand_signature(public_key, message) == *signature
    }
}

/// Wraps a verifier and counts how many times it was invoked.
#[derive(Debug, Default)]
pub struct CountingVerifier<V> {
    inner: V,
    calls: Cell<usize>,
}

impl<V> CountingVerifier<V> {
    /// Wrap `inner`.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<V: PqVerifier> PqVerifier for CountingVerifier<V> {
    fn verify(
        &self,
        public_key: &[u8; PUBKEY_SIZE],
        message: &[u8],
        signature: &[u8; SIG_SIZE],
    ) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.inner.verify(public_key, message, signature)
    }
}

/// Seven deterministic signers, seeded `[i; 32]` for reporter `i`.
pub fn reporter_signers() -> Vec<MockSigner> {
    (0..qoracle_types::NUM_REPORTERS as u8)
        .map(|i| MockSigner::from_seed([i; 32]))
        .collect()
}
