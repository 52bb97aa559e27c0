//! # ae-crypto
//!
//! Hashing primitives for the aeternity transaction codec.
//!
//! - Blake2b-256 hashing (transaction hashes, tree nodes, derived ids)
//! - SHA-256 and the double-SHA-256 checksum of encoded identifiers
//! - Random salts for name commitments

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;
mod salt;

pub use hash::{checksum, hash, sha256, CHECKSUM_LEN};
pub use salt::gen_salt;
