//! # ae-sdk
//!
//! Convenience layer over the aeternity transaction codec.
//!
//! ## Features
//!
//! - **TxObject**: build, modify, sign and parse transactions with automatic fees
//! - **SdkConfig**: TOML configuration with defaults for gas price and units
//! - **Logging**: `tracing-subscriber` setup driven by `RUST_LOG`
//!
//! ## Quick Start
//!
//! ```rust
//! use ae_sdk::{Tag, TxObject, TxParams};
//!
//! let account = "ak_i9svRuk9SJfAponRnCYVnVWN9HVLdBEd8ZdGREJMaUiTn4S4D";
//! let mut tx = TxObject::build(
//!     Tag::SpendTx,
//!     TxParams::new()
//!         .with("senderId", account)
//!         .with("recipientId", account)
//!         .with("amount", 0u64)
//!         .with("ttl", 0u64)
//!         .with("nonce", 0u64),
//! )
//! .unwrap();
//! tx.set_prop("payload", "hello").unwrap();
//! tx.add_signature([0u8; 64]).unwrap();
//! assert!(tx.encoded().starts_with("tx_"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod logging;
pub mod tx_object;

// Re-export commonly used types
pub use config::SdkConfig;
pub use error::SdkError;
pub use logging::init_logging;
pub use tx_object::{TxObject, SIGNATURE_LEN};

pub use ae_tx::{BigInt, BigUint, BuildOptions, Denomination, Tag, TxParams, UnpackedTx, Value};
