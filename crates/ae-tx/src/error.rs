//! Transaction codec errors

use std::fmt;

use ae_encoding::EncodingError;
use ae_primitives::PrimitiveError;
use ae_rlp::RlpError;
use num_bigint::BigUint;
use thiserror::Error;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Schema field name
    pub field: String,
    /// What is wrong with the value
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn render_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Transaction codec error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TxError {
    /// Identifier encoding error
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Malformed RLP
    #[error(transparent)]
    Rlp(#[from] RlpError),

    /// Primitive conversion error
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// One or more fields failed validation
    #[error("Transaction build error. {}", render_fields(.0))]
    Validation(Vec<FieldError>),

    /// No schema for the requested tag and version
    #[error("{0}")]
    SchemaNotFound(String),

    /// Argument does not satisfy a requirement
    #[error("{name} should be {requirement}, got {got} instead")]
    Argument {
        /// Argument name
        name: String,
        /// Requirement it failed
        requirement: String,
        /// Value received
        got: String,
    },

    /// Value is not acceptable for the field
    #[error("{0}")]
    IllegalArgument(String),

    /// Binary data cannot be decoded into a record
    #[error("{0}")]
    Decode(String),

    /// AENS name without the `.chain` suffix
    #[error("Name should end with .chain: {0}")]
    InvalidName(String),

    /// Name fee below the minimum for the name length
    #[error("the provided fee {fee} is not enough to execute the claim, required: {required}")]
    InsufficientNameFee {
        /// Fee supplied
        fee: BigUint,
        /// Minimum fee
        required: BigUint,
    },

    /// Tree node does not hash to its key
    #[error("Node hash is not equal to provided one")]
    MerkleTreeHashMismatch,

    /// Tree references a node that is not present
    #[error("{0}")]
    MissingNodeInTree(String),

    /// Path nibble outside of the extension and leaf range
    #[error("Unknown path nibble: {0}")]
    UnknownPathNibble(u8),

    /// Tree node with an unexpected number of items
    #[error("Unknown node length: {0}")]
    UnknownNodeLength(usize),

    /// Fee fixed point kept moving
    #[error("Fee calculation did not converge after {iterations} iterations, last estimate {last}")]
    FeeNotConverged {
        /// Iterations run
        iterations: usize,
        /// Last fee estimate
        last: BigUint,
    },

    /// Broken internal invariant
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TxError {
    /// Shortcut for [`TxError::Argument`]
    pub fn argument(
        name: impl Into<String>,
        requirement: impl Into<String>,
        got: impl fmt::Display,
    ) -> Self {
        TxError::Argument {
            name: name.into(),
            requirement: requirement.into(),
            got: got.to_string(),
        }
    }

    /// Field errors of a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            TxError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_renders_every_field() {
        let err = TxError::Validation(vec![
            FieldError::new("senderId", "Field is required"),
            FieldError::new("amount", "-1 must be >= 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "Transaction build error. senderId: Field is required; amount: -1 must be >= 0"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_argument_message() {
        let err = TxError::argument("RLP length", "9", 10);
        assert_eq!(err.to_string(), "RLP length should be 9, got 10 instead");
    }

    #[test]
    fn test_encoding_error_is_transparent() {
        let err: TxError = EncodingError::InvalidChecksum.into();
        assert_eq!(err.to_string(), "Invalid checksum");
    }
}
