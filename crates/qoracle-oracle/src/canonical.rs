//! Canonical encoding of a price observation.
//!
//! The signed payload is exactly 16 bytes:
//!
//! ```text
//! bytes 0..8   price      (u64, little-endian)
//! bytes 8..16  timestamp  (u64, little-endian)
//! ```
//!
//! `decimals` is not part of the payload. Existing reporters sign this exact
//! layout, so it must never change.

use zeroize::{Zeroize, ZeroizeOnDrop};

use qoracle_types::{PriceObservation, CANONICAL_MESSAGE_SIZE};

/// The bytes reporters sign for one observation. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CanonicalMessage([u8; CANONICAL_MESSAGE_SIZE]);

impl CanonicalMessage {
    /// The encoded payload.
    pub fn as_bytes(&self) -> &[u8; CANONICAL_MESSAGE_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for CanonicalMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode `observation` into its signed form.
///
/// # Examples
///
/// ```
/// use qoracle_oracle::canonical::canonicalize;
/// use qoracle_types::PriceObservation;
///
/// let msg = canonicalize(&PriceObservation::new(1, 15, 2));
/// assert_eq!(msg.as_bytes()[0], 1);
/// assert_eq!(msg.as_bytes()[8], 2);
/// ```
pub fn canonicalize(observation: &PriceObservation) -> CanonicalMessage {
    let mut out = [0u8; CANONICAL_MESSAGE_SIZE];
    out[..8].copy_from_slice(&observation.price.to_le_bytes());
    out[8..].copy_from_slice(&observation.timestamp.to_le_bytes());
    CanonicalMessage(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let obs = PriceObservation::new(0x0102_0304_0506_0708, 15, 0x1112_1314_1516_1718);
        let msg = canonicalize(&obs);
        assert_eq!(
            hex::encode(msg.as_bytes()),
            "08070605040302011817161514131211"
        );
    }

    #[test]
    fn test_decimals_not_signed() {
        let a = canonicalize(&PriceObservation::new(5_000, 15, 1_000));
        let b = canonicalize(&PriceObservation::new(5_000, 8, 1_000));
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_extremes() {
        let msg = canonicalize(&PriceObservation::new(u64::MAX, 0, 0));
        assert_eq!(&msg.as_bytes()[..8], &[0xFF; 8]);
        assert_eq!(&msg.as_bytes()[8..], &[0x00; 8]);
    }

    #[test]
    fn test_zeroize_clears_buffer() {
        let mut msg = canonicalize(&PriceObservation::new(u64::MAX, 15, u64::MAX));
        msg.zeroize();
        assert_eq!(msg.as_bytes(), &[0u8; CANONICAL_MESSAGE_SIZE]);
    }
}
