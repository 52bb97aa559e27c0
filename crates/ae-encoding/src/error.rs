//! Encoding errors

use ae_primitives::{Encoding, PrimitiveError};
use thiserror::Error;

/// Identifier encoding/decoding error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Malformed encoded string
    #[error("{0}")]
    Decode(String),

    /// Prefix differs from the one the caller requires
    #[error("Encoded string have a wrong type: {prefix} (expected: {required})")]
    PrefixMismatch {
        /// Prefix found in the string
        prefix: String,
        /// Prefix the caller asked for
        required: Encoding,
    },

    /// Prefix is not part of the encoding table
    #[error("prefix should be one of known encodings, got {0} instead")]
    UnknownPrefix(String),

    /// Id tag byte has no prefix
    #[error("Prefix for id-tag {0} not found.")]
    PrefixNotFound(u8),

    /// Prefix cannot be written as an id
    #[error("Id tag for prefix {0} not found.")]
    TagNotFound(String),

    /// Checksum does not match the payload
    #[error("Invalid checksum")]
    InvalidChecksum,

    /// Payload length differs from the one the prefix requires
    #[error("Payload should be {expected} bytes, got {got} instead")]
    PayloadLength {
        /// Length the prefix requires
        expected: usize,
        /// Length found
        got: usize,
    },
}

impl From<PrimitiveError> for EncodingError {
    fn from(e: PrimitiveError) -> Self {
        match e {
            PrimitiveError::PrefixNotFound(prefix) => EncodingError::UnknownPrefix(prefix),
            PrimitiveError::IdTagNotFound(tag) => EncodingError::PrefixNotFound(tag),
            other => EncodingError::Decode(other.to_string()),
        }
    }
}
