//! # ae-tx
//!
//! Schema-driven transaction codec.
//!
//! This crate provides:
//! - [`build_tx`] / [`unpack_tx`] - records to encoded transactions and back
//! - [`schema`] - the `(tag, version)` field layouts
//! - [`FieldType`] - per-field serialize, deserialize and validate
//! - [`calculate_min_fee`] - minimum fee fixed point
//! - [`MpTree`] - Merkle Patricia tree proofs carried inside transactions
//!
//! ```
//! use ae_tx::{build_tx, unpack_tx, BuildOptions, Tag, TxParams};
//!
//! let account = "ak_i9svRuk9SJfAponRnCYVnVWN9HVLdBEd8ZdGREJMaUiTn4S4D";
//! let params = TxParams::new()
//!     .with("senderId", account)
//!     .with("recipientId", account)
//!     .with("amount", 0u64)
//!     .with("ttl", 0u64)
//!     .with("nonce", 0u64);
//! let built = build_tx(&params, Tag::SpendTx, &BuildOptions::default()).unwrap();
//! let unpacked = unpack_tx(&built.tx, Some(Tag::SpendTx)).unwrap();
//! assert_eq!(unpacked.params.get_int("fee"), Some(16_660_000_000_000u64.into()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod amount;
pub mod builder;
pub mod error;
pub mod fee;
pub mod field;
pub mod helpers;
pub mod mptree;
pub mod schema;
pub mod tag;
pub mod value;

// Re-export commonly used types
pub use amount::{format_amount, to_ae, to_aettos, Denomination};
pub use builder::{
    build_tx, build_tx_hash, build_tx_hash_rlp, unpack_tx, unpack_tx_rlp, BuildOptions, BuiltTx,
    SchemaUnpacker,
};
pub use error::{FieldError, TxError};
pub use fee::{calculate_min_fee, DEFAULT_FEE_MAX_ITERATIONS};
pub use field::{Field, FieldType};
pub use mptree::{EntryUnpacker, MpTree};
pub use schema::Schema;
pub use tag::Tag;
pub use value::{
    CallReturnType, CtVersion, FunctionTypeInfo, Pointer, Ttl, TtlKind, TxParams, UnpackedTx,
    Value,
};

pub use num_bigint::{BigInt, BigUint};
