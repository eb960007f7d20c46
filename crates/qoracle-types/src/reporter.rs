//! Reporter keys and signatures.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{NUM_REPORTERS, PUBKEY_SIZE, SIG_SIZE};

/// Public key of one trusted price reporter (Dilithium3-sized, opaque).
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedReporterKey(#[serde_as(as = "serde_with::Bytes")] [u8; PUBKEY_SIZE]);

impl TrustedReporterKey {
    /// Wrap raw public-key bytes.
    pub fn from_bytes(bytes: [u8; PUBKEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Wrap a byte slice, which must be exactly [`PUBKEY_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReporterKeyError> {
        let arr: [u8; PUBKEY_SIZE] =
            bytes.try_into().map_err(|_| ReporterKeyError::InvalidKeyLength {
                expected: PUBKEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBKEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for TrustedReporterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrustedReporterKey({}..)", hex::encode(&self.0[..8]))
    }
}

/// One reporter's signature over a canonical price message.
///
/// `signer_index` is whatever the submitter claims. It is not trusted and
/// must be range-checked before indexing a [`ReporterKeySet`].
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterSignature {
    pub signer_index: u64,
    #[serde_as(as = "serde_with::Bytes")]
    pub signature: [u8; SIG_SIZE],
}

impl ReporterSignature {
    /// Create a signature entry.
    pub fn new(signer_index: u64, signature: [u8; SIG_SIZE]) -> Self {
        Self {
            signer_index,
            signature,
        }
    }
}

impl std::fmt::Debug for ReporterSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterSignature")
            .field("signer_index", &self.signer_index)
            .field("signature", &format_args!("{}..", hex::encode(&self.signature[..8])))
            .finish()
    }
}

/// The committee's trusted key set: exactly [`NUM_REPORTERS`] keys, fixed
/// for its lifetime. There is no API to replace an individual key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterKeySet([TrustedReporterKey; NUM_REPORTERS]);

impl ReporterKeySet {
    /// Build a key set from exactly [`NUM_REPORTERS`] keys.
    pub fn new(keys: [TrustedReporterKey; NUM_REPORTERS]) -> Self {
        Self(keys)
    }

    /// Resolve a claimed signer index to its slot and key.
    ///
    /// Returns `None` for any index outside `0..NUM_REPORTERS`; a returned
    /// slot is always a valid index into a `[_; NUM_REPORTERS]` array.
    pub fn resolve(&self, signer_index: u64) -> Option<(usize, &TrustedReporterKey)> {
        let slot = usize::try_from(signer_index).ok()?;
        self.0.get(slot).map(|key| (slot, key))
    }

    /// Iterate over the keys in index order.
    pub fn iter(&self) -> impl Iterator<Item = &TrustedReporterKey> {
        self.0.iter()
    }

    /// Always [`NUM_REPORTERS`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<TrustedReporterKey>> for ReporterKeySet {
    type Error = ReporterKeyError;

    fn try_from(keys: Vec<TrustedReporterKey>) -> Result<Self, Self::Error> {
        let actual = keys.len();
        let keys: [TrustedReporterKey; NUM_REPORTERS] =
            keys.try_into().map_err(|_| ReporterKeyError::WrongKeyCount {
                expected: NUM_REPORTERS,
                actual,
            })?;
        Ok(Self(keys))
    }
}

/// Errors constructing reporter keys or key sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReporterKeyError {
    /// A key was not [`PUBKEY_SIZE`] bytes long.
    #[error("invalid reporter key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A key set did not contain exactly [`NUM_REPORTERS`] keys.
    #[error("wrong reporter key count: expected {expected}, got {actual}")]
    WrongKeyCount { expected: usize, actual: usize },
}
