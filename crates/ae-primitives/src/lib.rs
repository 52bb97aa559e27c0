//! # ae-primitives
//!
//! Primitive types for the aeternity transaction codec.
//!
//! This crate provides the fundamental data types used throughout the system:
//! 32-byte hashes, the table of encoding prefixes and the canonical
//! big-endian integer representation used on the wire.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod encoding;
mod error;
mod hash;
pub mod int;

pub use encoding::{Alphabet, Encoding, IdTag};
pub use error::PrimitiveError;
pub use hash::{HashError, H256};

// Re-export big integers for callers building field values
pub use num_bigint::{BigInt, BigUint};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biguint_reexport() {
        let a = BigUint::from(100u64);
        let b = BigUint::from(200u64);
        assert_eq!(a + b, BigUint::from(300u64));
    }
}
