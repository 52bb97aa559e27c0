//! # ae-rlp
//!
//! RLP (Recursive Length Prefix) encoding/decoding for the aeternity
//! transaction codec.
//!
//! Transactions are untyped trees of byte strings and lists; their meaning
//! comes from a schema applied afterwards. [`RlpItem`] models that tree on
//! top of the `rlp` crate.
//!
//! ## RLP Encoding Rules
//!
//! - Single byte `[0x00, 0x7f]`: itself
//! - Short string (0-55 bytes): `0x80 + len` + data
//! - Long string (>55 bytes): `0xb7 + len_of_len` + len + data
//! - Short list (0-55 bytes payload): `0xc0 + len` + items
//! - Long list (>55 bytes payload): `0xf7 + len_of_len` + len + items

#![warn(missing_docs)]
#![warn(clippy::all)]

use thiserror::Error;

// Re-export rlp crate for direct use
pub use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// RLP decoding error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RlpError {
    /// Malformed RLP
    #[error("invalid RLP: {0}")]
    Decoder(#[from] DecoderError),

    /// Input continues after the first item
    #[error("RLP item ends at byte {consumed} but input has {total} bytes")]
    TrailingBytes {
        /// Bytes covered by the decoded item
        consumed: usize,
        /// Bytes supplied
        total: usize,
    },
}

/// A decoded RLP tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpItem {
    /// Byte string
    Bytes(Vec<u8>),
    /// List of nested items
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string
    pub fn empty() -> Self {
        RlpItem::Bytes(Vec::new())
    }

    /// Byte contents, `None` for lists
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    /// List contents, `None` for byte strings
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::Bytes(_) => None,
        }
    }

    /// Check whether this item is a list
    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Encode to RLP bytes
    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

impl Encodable for RlpItem {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            RlpItem::Bytes(bytes) => {
                s.encoder().encode_value(bytes);
            }
            RlpItem::List(items) => {
                s.begin_list(items.len());
                for item in items {
                    s.append(item);
                }
            }
        }
    }
}

impl Decodable for RlpItem {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if !rlp.is_list() {
            return rlp.data().map(|data| RlpItem::Bytes(data.to_vec()));
        }
        // every byte of the list payload must belong to an item
        let payload_len = rlp.payload_info()?.value_len;
        let count = rlp.item_count()?;
        let mut items = Vec::with_capacity(count);
        let mut consumed = 0;
        for i in 0..count {
            let item = rlp.at(i)?;
            consumed += item.as_raw().len();
            items.push(RlpItem::decode(&item)?);
        }
        if consumed != payload_len {
            return Err(DecoderError::RlpInconsistentLengthAndData);
        }
        Ok(RlpItem::List(items))
    }
}

/// Encode a value to RLP bytes
pub fn encode<T: Encodable>(value: &T) -> Vec<u8> {
    rlp::encode(value).to_vec()
}

/// Decode exactly one RLP item spanning the whole input
pub fn decode(data: &[u8]) -> Result<RlpItem, RlpError> {
    let rlp = Rlp::new(data);
    let info = rlp.payload_info()?;
    let consumed = info.header_len + info.value_len;
    if consumed > data.len() {
        return Err(RlpError::Decoder(DecoderError::RlpIsTooShort));
    }
    if consumed < data.len() {
        return Err(RlpError::TrailingBytes {
            consumed,
            total: data.len(),
        });
    }
    Ok(RlpItem::decode(&rlp)?)
}
