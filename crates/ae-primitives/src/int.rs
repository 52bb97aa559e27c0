//! Canonical big-endian integer bytes
//!
//! Integers go on the wire as minimal big-endian byte strings. Zero is
//! written as a single `0x00` byte, which is what the network produces; an
//! empty buffer is still accepted and read back as zero.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::PrimitiveError;

/// Minimal big-endian bytes of a non-negative integer
pub fn to_bytes(value: &BigUint) -> Vec<u8> {
    value.to_bytes_be()
}

/// Read a big-endian integer, empty input is zero
pub fn from_bytes(bytes: &[u8]) -> BigUint {
    if bytes.is_empty() {
        return BigUint::zero();
    }
    BigUint::from_bytes_be(bytes)
}

/// Big-endian bytes left-padded with zeros to exactly `len` bytes
pub fn to_fixed_bytes(value: &BigUint, len: usize) -> Result<Vec<u8>, PrimitiveError> {
    let raw = if value.is_zero() { Vec::new() } else { value.to_bytes_be() };
    if raw.len() > len {
        return Err(PrimitiveError::IntOverflow {
            needed: raw.len(),
            available: len,
        });
    }
    let mut out = vec![0u8; len - raw.len()];
    out.extend_from_slice(&raw);
    Ok(out)
}

/// Shortcut for `u64` values
pub fn u64_to_bytes(value: u64) -> Vec<u8> {
    to_bytes(&BigUint::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_single_byte() {
        assert_eq!(to_bytes(&BigUint::zero()), vec![0x00]);
        assert_eq!(u64_to_bytes(0), vec![0x00]);
    }

    #[test]
    fn test_minimal_encoding() {
        assert_eq!(u64_to_bytes(1), vec![0x01]);
        assert_eq!(u64_to_bytes(256), vec![0x01, 0x00]);
        // 2 AE in aettos
        assert_eq!(
            u64_to_bytes(2_000_000_000_000_000_000),
            vec![0x1b, 0xc1, 0x6d, 0x67, 0x4e, 0xc8, 0x00, 0x00]
        );
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(from_bytes(&[]), BigUint::zero());
        assert_eq!(from_bytes(&[0x00]), BigUint::zero());
        assert_eq!(from_bytes(&[0x01, 0x00]), BigUint::from(256u32));
        // leading zeros are tolerated on read
        assert_eq!(from_bytes(&[0x00, 0x00, 0x05]), BigUint::from(5u32));
    }

    #[test]
    fn test_fixed_bytes() {
        let padded = to_fixed_bytes(&BigUint::from(0x0102u32), 4).unwrap();
        assert_eq!(padded, vec![0x00, 0x00, 0x01, 0x02]);
        assert_eq!(to_fixed_bytes(&BigUint::zero(), 2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_fixed_bytes_overflow() {
        let err = to_fixed_bytes(&BigUint::from(0x010203u32), 2).unwrap_err();
        assert_eq!(err, PrimitiveError::IntOverflow { needed: 3, available: 2 });
    }
}
