//! Derived identifiers and AENS helpers

use ae_crypto::hash;
use ae_encoding::{decode, decode_as, encode};
use ae_primitives::{int, Encoding};
use num_bigint::BigUint;

use crate::TxError;

/// Minimum gas price accepted by the network, in aettos
pub const MIN_GAS_PRICE: u64 = 1_000_000_000;

/// Relative TTL of a claimed name
pub const NAME_TTL: u64 = 180_000;

/// Maximum relative TTL of a name update
pub const NAME_MAX_TTL: u64 = 36_000;

/// Maximum client TTL of a name, in seconds
pub const NAME_MAX_CLIENT_TTL: u64 = 84_600;

/// Default client TTL of a name
pub const CLIENT_TTL: u64 = NAME_MAX_CLIENT_TTL;

/// Multiplier of the name bid ranges
pub const NAME_FEE_MULTIPLIER: u64 = 100_000_000_000_000;

/// Minimum bid increment, in percent
pub const NAME_FEE_BID_INCREMENT: u32 = 5;

/// Longest name that still pays a length-based fee
pub const NAME_MAX_LENGTH_FEE: usize = 31;

/// Longest name that goes to auction
pub const NAME_BID_MAX_LENGTH: usize = 12;

/// Suffix of every AENS name
pub const AENS_SUFFIX: &str = ".chain";

// Fibonacci bid ranges, index is the name length without the suffix
const NAME_BID_RANGES: [u64; NAME_MAX_LENGTH_FEE + 1] = [
    0, 5702887, 3524578, 2178309, 1346269, 832040, 514229, 317811, 196418, 121393, 75025, 46368,
    28657, 17711, 10946, 6765, 4181, 2584, 1597, 987, 610, 377, 233, 144, 89, 55, 34, 21, 13, 8,
    5, 3,
];

const POINTER_KEYS: [(Encoding, &str); 4] = [
    (Encoding::AccountAddress, "account_pubkey"),
    (Encoding::OracleAddress, "oracle_pubkey"),
    (Encoding::ContractAddress, "contract_pubkey"),
    (Encoding::Channel, "channel"),
];

/// Fail with [`TxError::InvalidName`] unless `name` ends with `.chain`
pub fn ensure_name_valid(name: &str) -> Result<(), TxError> {
    if !name.ends_with(AENS_SUFFIX) {
        return Err(TxError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Check whether `name` is an AENS name
pub fn is_name_valid(name: &str) -> bool {
    ensure_name_valid(name).is_ok()
}

fn name_length(name: &str) -> usize {
    name.chars().count() - AENS_SUFFIX.chars().count()
}

/// `nm_` id of an AENS name
pub fn produce_name_id(name: &str) -> Result<String, TxError> {
    ensure_name_valid(name)?;
    Ok(encode(hash(name.to_lowercase().as_bytes()).as_bytes(), Encoding::Name)?)
}

/// Commitment of a name preclaim
///
/// The salt is hashed as a 32-byte big-endian integer after the name.
pub fn commitment_hash(name: &str, salt: u64) -> Result<String, TxError> {
    ensure_name_valid(name)?;
    let mut data = name.to_lowercase().into_bytes();
    data.extend(int::to_fixed_bytes(&BigUint::from(salt), 32)?);
    Ok(encode(hash(&data).as_bytes(), Encoding::Commitment)?)
}

/// Address of a contract created by `owner_id` with `nonce`
pub fn build_contract_id(owner_id: &str, nonce: u64) -> Result<String, TxError> {
    let mut data = decode_as(owner_id, Encoding::AccountAddress)?;
    data.extend(int::u64_to_bytes(nonce));
    Ok(encode(hash(&data).as_bytes(), Encoding::ContractAddress)?)
}

/// Id of an oracle query sent by `sender_id` with `nonce`
pub fn oracle_query_id(sender_id: &str, nonce: u64, oracle_id: &str) -> Result<String, TxError> {
    let mut data = decode_as(sender_id, Encoding::AccountAddress)?;
    data.extend(int::to_fixed_bytes(&BigUint::from(nonce), 32)?);
    data.extend(decode_as(oracle_id, Encoding::OracleAddress)?);
    Ok(encode(hash(&data).as_bytes(), Encoding::OracleQueryId)?)
}

/// Minimum fee of a name claim, depends on the name length
pub fn get_minimum_name_fee(name: &str) -> Result<BigUint, TxError> {
    ensure_name_valid(name)?;
    let length = name_length(name);
    if length == 0 {
        return Err(TxError::InvalidName(name.to_string()));
    }
    let range = NAME_BID_RANGES[length.min(NAME_MAX_LENGTH_FEE)];
    Ok(BigUint::from(range) * BigUint::from(NAME_FEE_MULTIPLIER))
}

/// Minimum next bid of a name auction
///
/// Starts from `start_fee` or, if none, from the minimum name fee, and adds
/// the bid increment rounding up.
pub fn compute_bid_fee(name: &str, start_fee: Option<&BigUint>) -> Result<BigUint, TxError> {
    let start = match start_fee {
        Some(fee) => fee.clone(),
        None => get_minimum_name_fee(name)?,
    };
    let scaled = start * BigUint::from(100 + NAME_FEE_BID_INCREMENT);
    Ok((scaled + BigUint::from(99u32)) / BigUint::from(100u32))
}

/// Check whether claiming `name` starts an auction
pub fn is_auction_name(name: &str) -> Result<bool, TxError> {
    ensure_name_valid(name)?;
    Ok(name_length(name) <= NAME_BID_MAX_LENGTH)
}

/// Default AENS pointer key for an identifier
pub fn get_default_pointer_key(identifier: &str) -> Result<&'static str, TxError> {
    decode(identifier)?;
    let prefix = identifier.get(..2).unwrap_or_default();
    POINTER_KEYS
        .iter()
        .find(|(encoding, _)| encoding.prefix() == prefix)
        .map(|(_, key)| *key)
        .ok_or_else(|| {
            TxError::argument(
                "identifier",
                "prefixed with one of ak_, ok_, ct_, ch_",
                identifier,
            )
        })
}
