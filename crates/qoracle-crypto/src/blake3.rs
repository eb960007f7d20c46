//! Domain-separated BLAKE3 hashing.
//!
//! Every derived value uses BLAKE3's key-derivation mode with one of the
//! context strings in `contexts`, so outputs from different purposes can
//! never collide.

use qoracle_types::ReporterKeySet;

/// Registered BLAKE3 context strings.
pub mod contexts {
    pub const REPORTER_KEY_FINGERPRINT: &str = "qoracle v1 reporter-key-fingerprint";
    pub const REPORTER_KEY_SET: &str = "qoracle v1 reporter-key-set";
    pub const MOCK_REPORTER_KEYGEN: &str = "qoracle v1 mock-reporter-keygen";
    pub const MOCK_REPORTER_SIGNATURE: &str = "qoracle v1 mock-reporter-signature";
}

/// Compute the BLAKE3 hash of the input data.
pub fn hash(data: &[u8]) -> [u8; 32] {
    *::blake3::hash(data).as_bytes()
}

/// Fill `output` with BLAKE3 extendable output seeded by `data`.
pub fn hash_xof(data: &[u8], output: &mut [u8]) {
    let mut hasher = ::blake3::Hasher::new();
    hasher.update(data);
    let mut reader = hasher.finalize_xof();
    reader.fill(output);
}

/// Derive a 32-byte key in BLAKE3 key-derivation mode.
///
/// `context` should be one of the strings in [`contexts`].
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    let mut hasher = ::blake3::Hasher::new_derive_key(context);
    hasher.update(key_material);
    *hasher.finalize().as_bytes()
}

/// Keyed BLAKE3 hash (MAC/PRF).
pub fn keyed_hash(key: &[u8; 32], message: &[u8]) -> [u8; 32] {
    *::blake3::keyed_hash(key, message).as_bytes()
}

/// Short stable identifier for a reporter public key, for logs and tooling.
pub fn key_fingerprint(public_key: &[u8]) -> [u8; 32] {
    derive_key(contexts::REPORTER_KEY_FINGERPRINT, public_key)
}

/// Identity of a whole committee key set, in index order.
///
/// Two key sets share a fingerprint only if every key matches at the same index.
pub fn key_set_fingerprint(keys: &ReporterKeySet) -> [u8; 32] {
    let mut hasher = ::blake3::Hasher::new_derive_key(contexts::REPORTER_KEY_SET);
    for key in keys.iter() {
        hasher.update(key.as_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Hex form of the first 8 bytes of [`key_fingerprint`].
pub fn short_fingerprint(public_key: &[u8]) -> String {
    short_hex(&key_fingerprint(public_key))
}

/// Hex form of the first 8 bytes of a digest.
pub fn short_hex(digest: &[u8; 32]) -> String {
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash(b"qoracle"), hash(b"qoracle"));
        assert_ne!(hash(b"qoracle"), hash(b"qoracle "));
    }

    #[test]
    fn test_xof_prefix_consistent() {
        let mut short = [0u8; 32];
        let mut long = [0u8; 2701];
        hash_xof(b"seed", &mut short);
        hash_xof(b"seed", &mut long);
        assert_eq!(&long[..32], &short);
        assert_eq!(short, hash(b"seed"));
    }

    #[test]
    fn test_contexts_are_separated() {
        let a = derive_key(contexts::MOCK_REPORTER_KEYGEN, b"material");
        let b = derive_key(contexts::MOCK_REPORTER_SIGNATURE, b"material");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_set_fingerprint_is_order_sensitive() {
        use qoracle_types::{TrustedReporterKey, PUBKEY_SIZE};

        let set = |offset: u8| {
            ReporterKeySet::new(std::array::from_fn(|i| {
                TrustedReporterKey::from_bytes([(i as u8 + offset) % 7; PUBKEY_SIZE])
            }))
        };
        assert_eq!(key_set_fingerprint(&set(0)), key_set_fingerprint(&set(0)));
        // Same keys, rotated indices.
        assert_ne!(key_set_fingerprint(&set(0)), key_set_fingerprint(&set(1)));
    }

    #[test]
    fn test_short_fingerprint_length() {
        let fp = short_fingerprint(&[7u8; 1472]);
        assert_eq!(fp.len(), 16);
        assert_eq!(fp, hex::encode(&key_fingerprint(&[7u8; 1472])[..8]));
    }
}
