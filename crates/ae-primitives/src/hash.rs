//! 32-byte hash type used for tree roots, node keys and id payloads

use std::fmt;
use thiserror::Error;

/// Hash parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// Invalid length
    #[error("invalid hash length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

/// 256-bit hash (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H256([u8; 32]);

impl H256 {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| HashError::InvalidLength {
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(H256(bytes))
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex without prefix, the form node APIs and tree paths use
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for H256 {
    fn from(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const DIGEST: [u8; 32] =
        hex!("0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8");

    // ==================== Length boundaries ====================

    #[test]
    fn test_h256_from_slice_lengths() {
        assert_eq!(
            H256::from_slice(&[0u8; 31]),
            Err(HashError::InvalidLength { expected: 32, got: 31 })
        );
        assert_eq!(
            H256::from_slice(&[0u8; 33]),
            Err(HashError::InvalidLength { expected: 32, got: 33 })
        );
        assert_eq!(H256::from_slice(&DIGEST).unwrap().as_bytes(), &DIGEST);
    }

    // ==================== Formatting ====================

    #[test]
    fn test_h256_hex() {
        let hash = H256::from(DIGEST);
        assert_eq!(
            hash.to_string(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
        assert!(format!("{hash:?}").starts_with("H256(0e5751c0"));
    }

    #[test]
    fn test_h256_ordering() {
        assert!(H256::from_bytes([0x01; 32]) < H256::from_bytes([0x02; 32]));
    }
}
