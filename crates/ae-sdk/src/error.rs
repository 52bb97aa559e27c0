//! SDK error types

use ae_encoding::EncodingError;
use ae_tx::TxError;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transaction codec error
    #[error(transparent)]
    Tx(TxError),

    /// Configuration file could not be parsed or written
    #[error("Config error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),

    /// Signature with the wrong length
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Transaction carries no signatures
    #[error("Signatures not found, transaction is not signed")]
    NotSigned,

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<TxError> for SdkError {
    fn from(e: TxError) -> Self {
        SdkError::Tx(e)
    }
}

impl From<EncodingError> for SdkError {
    fn from(e: EncodingError) -> Self {
        SdkError::Tx(TxError::Encoding(e))
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(e: toml::de::Error) -> Self {
        SdkError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SdkError {
    fn from(e: toml::ser::Error) -> Self {
        SdkError::Config(e.to_string())
    }
}

impl From<std::io::Error> for SdkError {
    fn from(e: std::io::Error) -> Self {
        SdkError::Io(e.to_string())
    }
}
