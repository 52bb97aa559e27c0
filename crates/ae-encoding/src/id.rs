//! Binary form of `id` fields: `[tag][32-byte hash]`

use ae_primitives::{Encoding, IdTag};

use crate::{decode_as, encode, EncodingError};

/// Length of a serialized id
pub const ID_LEN: usize = 33;

/// Serialize an encoded identifier into its tagged binary form
pub fn write_id(id: &str) -> Result<Vec<u8>, EncodingError> {
    let prefix = id.get(..2).unwrap_or(id);
    let encoding = Encoding::from_prefix(prefix)
        .map_err(|_| EncodingError::TagNotFound(prefix.to_string()))?;
    let tag = encoding
        .id_tag()
        .ok_or_else(|| EncodingError::TagNotFound(prefix.to_string()))?;
    let hash = decode_as(id, encoding)?;
    let mut out = Vec::with_capacity(1 + hash.len());
    out.push(tag as u8);
    out.extend_from_slice(&hash);
    Ok(out)
}

/// Read a tagged binary id back into its encoded form
pub fn read_id(bytes: &[u8]) -> Result<String, EncodingError> {
    let (&tag, hash) = bytes
        .split_first()
        .ok_or_else(|| EncodingError::Decode("Id is empty".to_string()))?;
    let tag = IdTag::from_u8(tag)?;
    encode(hash, tag.encoding())
}
