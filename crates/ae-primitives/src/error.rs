//! Common error types for primitives

use thiserror::Error;

use crate::hash::HashError;

/// Primitive operation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Hash error
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    /// Prefix is not part of the encoding table
    #[error("Encoding prefix not found: {0}")]
    PrefixNotFound(String),

    /// Byte is not a known id tag
    #[error("Id tag not found: {0}")]
    IdTagNotFound(u8),

    /// Integer does not fit into the requested width
    #[error("integer needs {needed} bytes, only {available} available")]
    IntOverflow {
        /// Bytes needed for the value
        needed: usize,
        /// Width requested by the caller
        available: usize,
    },
}
