//! base58check / base64check codec

use ae_crypto::{checksum, CHECKSUM_LEN};
use ae_primitives::{Alphabet, Encoding};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::EncodingError;

fn ensure_valid_length(data: &[u8], encoding: Encoding) -> Result<(), EncodingError> {
    match encoding.fixed_len() {
        Some(expected) if expected != data.len() => Err(EncodingError::PayloadLength {
            expected,
            got: data.len(),
        }),
        _ => Ok(()),
    }
}

fn add_checksum(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    out.extend_from_slice(payload);
    out.extend_from_slice(&checksum(payload));
    out
}

fn strip_checksum(mut buffer: Vec<u8>) -> Result<Vec<u8>, EncodingError> {
    if buffer.len() < CHECKSUM_LEN {
        return Err(EncodingError::InvalidChecksum);
    }
    let split = buffer.len() - CHECKSUM_LEN;
    if checksum(&buffer[..split]) != buffer[split..] {
        return Err(EncodingError::InvalidChecksum);
    }
    buffer.truncate(split);
    Ok(buffer)
}

fn decode_payload(payload: &str, alphabet: Alphabet) -> Result<Vec<u8>, EncodingError> {
    let raw = match alphabet {
        Alphabet::Base58 => bs58::decode(payload)
            .into_vec()
            .map_err(|e| EncodingError::Decode(format!("Invalid base58 payload: {e}")))?,
        Alphabet::Base64 => STANDARD
            .decode(payload)
            .map_err(|e| EncodingError::Decode(format!("Invalid base64 payload: {e}")))?,
    };
    strip_checksum(raw)
}

/// Encode data with the given prefix
///
/// # Errors
///
/// Returns [`EncodingError::PayloadLength`] if the prefix requires a fixed
/// length and `data` has a different one.
pub fn encode(data: &[u8], encoding: Encoding) -> Result<String, EncodingError> {
    ensure_valid_length(data, encoding)?;
    let payload = add_checksum(data);
    let body = match encoding.alphabet() {
        Alphabet::Base58 => bs58::encode(payload).into_string(),
        Alphabet::Base64 => STANDARD.encode(payload),
    };
    Ok(format!("{}_{}", encoding.prefix(), body))
}

/// Decode an encoded string, returning its prefix along with the data
pub fn decode_with_prefix(data: &str) -> Result<(Encoding, Vec<u8>), EncodingError> {
    let mut parts = data.split('_');
    let prefix = parts.next().unwrap_or_default();
    let payload = parts
        .next()
        .ok_or_else(|| EncodingError::Decode(format!("Encoded string missing payload: {data}")))?;
    if parts.next().is_some() {
        return Err(EncodingError::Decode(format!(
            "Encoded string have extra parts: {data}"
        )));
    }
    let encoding = Encoding::from_prefix(prefix)?;
    let bytes = decode_payload(payload, encoding.alphabet())?;
    ensure_valid_length(&bytes, encoding)?;
    Ok((encoding, bytes))
}

/// Decode an encoded string of any known prefix
pub fn decode(data: &str) -> Result<Vec<u8>, EncodingError> {
    decode_with_prefix(data).map(|(_, bytes)| bytes)
}

/// Decode an encoded string that must carry the given prefix
pub fn decode_as(data: &str, required: Encoding) -> Result<Vec<u8>, EncodingError> {
    let prefix = data.split('_').next().unwrap_or_default();
    if data.contains('_') && prefix != required.prefix() {
        return Err(EncodingError::PrefixMismatch {
            prefix: prefix.to_string(),
            required,
        });
    }
    decode(data)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fixed_len_encodings() -> impl Strategy<Value = Encoding> {
        prop::sample::select(
            Encoding::ALL
                .iter()
                .copied()
                .filter(|e| e.fixed_len().is_some())
                .collect::<Vec<_>>(),
        )
    }

    proptest! {
        #[test]
        fn prop_fixed_len_roundtrip(encoding in fixed_len_encodings(), seed in any::<[u8; 32]>()) {
            let len = encoding.fixed_len().unwrap_or(32);
            let data: Vec<u8> = seed.iter().cycle().take(len).copied().collect();
            let encoded = encode(&data, encoding).unwrap();
            prop_assert_eq!(decode_as(&encoded, encoding).unwrap(), data);
        }

        #[test]
        fn prop_free_len_roundtrip(data in prop::collection::vec(any::<u8>(), 0..96)) {
            for encoding in [Encoding::Bytearray, Encoding::Transaction, Encoding::Name] {
                let encoded = encode(&data, encoding).unwrap();
                prop_assert_eq!(decode(&encoded).unwrap(), data.clone());
            }
        }

        #[test]
        fn prop_flipped_checksum_rejected(data in prop::collection::vec(any::<u8>(), 1..64), bit in 0u8..8) {
            let mut payload = add_checksum(&data);
            let last = payload.len() - 1;
            payload[last] ^= 1 << bit;
            let encoded = format!("ba_{}", STANDARD.encode(&payload));
            prop_assert_eq!(decode(&encoded), Err(EncodingError::InvalidChecksum));
        }
    }
}
