//! Blake2b-256 and SHA-256 hashing

use ae_primitives::H256;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sha2::Sha256;

type Blake2b256 = Blake2b<U32>;

/// Length of the identifier checksum
pub const CHECKSUM_LEN: usize = 4;

/// Compute the Blake2b-256 hash of the input data
pub fn hash(data: &[u8]) -> H256 {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Compute the SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of `sha256(sha256(data))`
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256(&sha256(data));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
