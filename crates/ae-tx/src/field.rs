//! Field codecs
//!
//! Every schema field has a [`FieldType`] that knows how to turn a logical
//! [`Value`] into its RLP form, how to read it back, and which values are
//! acceptable at build time.

use std::sync::Arc;

use ae_encoding::{decode, decode_as, encode, read_id, write_id};
use ae_primitives::{int, Encoding};
use ae_rlp::RlpItem;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};

use crate::helpers::{get_minimum_name_fee, is_name_valid, produce_name_id, MIN_GAS_PRICE};
use crate::{
    CallReturnType, CtVersion, EntryUnpacker, FunctionTypeInfo, MpTree, Pointer, Tag, TxError,
    TxParams, Value,
};

/// Maximum number of AENS pointers in a name update
pub const MAX_POINTERS: usize = 32;

/// Length of a raw signature
pub const SIGNATURE_LEN: usize = 64;

/// Wire type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Non-negative integer
    Int,
    /// Coin amount, scaled by the build denomination
    Amount,
    /// Tagged id restricted to the given prefixes
    Id(&'static [Encoding]),
    /// List of tagged ids restricted to the given prefixes
    Ids(&'static [Encoding]),
    /// Single byte flag
    Bool,
    /// Encoded string with a fixed prefix, stored decoded
    Binary(Encoding),
    /// UTF-8 text
    String,
    /// Bytes exposed as a hex string
    Hex,
    /// Bytes passed through
    RawBinary,
    /// List of bytes passed through
    RawBinaries,
    /// List of signatures
    Signatures,
    /// AENS pointers
    Pointers,
    /// Optional payload, text or `ba_` encoded bytes
    Payload,
    /// Nested record stored as RLP bytes
    RlpBinary,
    /// List of nested records
    RlpBinaries,
    /// List of channel off-chain updates, no current schema version uses it
    OffChainUpdates,
    /// List of Merkle Patricia trees with the given key prefix and value tag
    MpTrees(Encoding, Tag),
    /// Contract call outcome
    CallReturnType,
    /// Contract VM and ABI versions
    CtVersion,
    /// Contract call stack
    CallStack,
    /// Compiled contract type information
    SophiaCodeTypeInfo,
    /// Channel state trees, `ss_` encoded
    StateTree,
    /// AENS name
    Name,
    /// AENS name or its `nm_` id
    NameId,
    /// Name claim fee, defaults to the minimum for the name
    NameFee,
    /// Contract deposit, must be zero
    Deposit,
    /// Gas price, defaults to the network minimum
    GasPrice,
}

/// A named field of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Parameter name
    pub name: &'static str,
    /// Wire type
    pub kind: FieldType,
}

impl Field {
    /// Create a new field
    pub const fn new(name: &'static str, kind: FieldType) -> Self {
        Self { name, kind }
    }
}

fn prefixes(encodings: &[Encoding], sep: &str) -> String {
    encodings
        .iter()
        .map(|e| e.prefix())
        .collect::<Vec<_>>()
        .join(sep)
}

fn unexpected(expected: &str, value: &Value) -> TxError {
    TxError::IllegalArgument(format!("Expected {expected}, got {} instead", value.kind()))
}

fn expect_str<'a>(value: &'a Value, expected: &str) -> Result<&'a str, TxError> {
    value.as_str().ok_or_else(|| unexpected(expected, value))
}

fn expect_uint(value: &Value) -> Result<BigUint, TxError> {
    value.as_uint().ok_or_else(|| {
        TxError::IllegalArgument(format!("{value} is not a non-negative integer"))
    })
}

fn expect_list<'a>(value: &'a Value, expected: &str) -> Result<&'a [Value], TxError> {
    value.as_list().ok_or_else(|| unexpected(expected, value))
}

fn bytes_of(item: &RlpItem) -> Result<&[u8], TxError> {
    item.as_bytes()
        .ok_or_else(|| TxError::Decode("Expected bytes, got a list".to_string()))
}

fn list_of(item: &RlpItem) -> Result<&[RlpItem], TxError> {
    item.as_list()
        .ok_or_else(|| TxError::Decode("Expected a list, got bytes".to_string()))
}

fn write_int(value: &BigUint) -> RlpItem {
    RlpItem::Bytes(int::to_bytes(value))
}

fn read_int(item: &RlpItem) -> Result<Value, TxError> {
    Ok(Value::from(int::from_bytes(bytes_of(item)?)))
}

fn ensure_allowed(encoding: Encoding, allowed: &[Encoding]) -> Result<(), TxError> {
    if allowed.contains(&encoding) {
        return Ok(());
    }
    Err(TxError::argument(
        "Address encoding",
        prefixes(allowed, ", "),
        encoding.prefix(),
    ))
}

fn write_allowed_id(id: &str, allowed: &[Encoding]) -> Result<RlpItem, TxError> {
    let bytes = write_id(id)?;
    let encoding = ae_primitives::IdTag::from_u8(bytes[0])?.encoding();
    ensure_allowed(encoding, allowed)?;
    Ok(RlpItem::Bytes(bytes))
}

fn read_allowed_id(item: &RlpItem, allowed: &[Encoding]) -> Result<Value, TxError> {
    let id = read_id(bytes_of(item)?)?;
    let encoding = Encoding::from_prefix(id.get(..2).unwrap_or_default())?;
    ensure_allowed(encoding, allowed)?;
    Ok(Value::Str(id))
}

fn serialize_nested(value: &Value) -> Result<RlpItem, TxError> {
    match value {
        Value::Tx(tx) => Ok(RlpItem::Bytes(tx.rlp.clone())),
        Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
        Value::Str(s) => Ok(RlpItem::Bytes(decode_as(s, Encoding::Transaction)?)),
        other => Err(unexpected("a transaction", other)),
    }
}

fn serialize_pointer(pointer: &Pointer) -> Result<RlpItem, TxError> {
    Ok(RlpItem::List(vec![
        RlpItem::Bytes(pointer.key.as_bytes().to_vec()),
        RlpItem::Bytes(write_id(&pointer.id)?),
    ]))
}

fn deserialize_pointer(item: &RlpItem) -> Result<Pointer, TxError> {
    let [key, id] = list_of(item)? else {
        return Err(TxError::Decode("Pointer should have two items".to_string()));
    };
    Ok(Pointer {
        key: String::from_utf8_lossy(bytes_of(key)?).into_owned(),
        id: read_id(bytes_of(id)?)?,
    })
}

fn deserialize_type_info(item: &RlpItem) -> Result<FunctionTypeInfo, TxError> {
    let [fun_hash, name, arg_type, out_type] = list_of(item)? else {
        return Err(TxError::Decode(
            "Function type info should have four items".to_string(),
        ));
    };
    Ok(FunctionTypeInfo {
        name: String::from_utf8_lossy(bytes_of(name)?).into_owned(),
        fun_hash: bytes_of(fun_hash)?.to_vec(),
        arg_type: bytes_of(arg_type)?.to_vec(),
        out_type: bytes_of(out_type)?.to_vec(),
    })
}

fn text(item: &RlpItem) -> Result<Value, TxError> {
    Ok(Value::Str(String::from_utf8_lossy(bytes_of(item)?).into_owned()))
}

impl FieldType {
    /// Fields that may be left out and get a default on serialization
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            FieldType::Payload | FieldType::NameFee | FieldType::Deposit | FieldType::GasPrice
        )
    }

    /// Check a value before serialization, returning the problem if any
    pub fn validate(&self, value: Option<&Value>) -> Option<String> {
        let Some(value) = value else {
            return (!self.is_optional()).then(|| "Field is required".to_string());
        };
        match self {
            FieldType::Int | FieldType::Amount => match value.as_int() {
                None => Some(format!("{value} is not of type Number or BigNumber")),
                Some(n) if n.is_negative() => Some(format!("{value} must be >= 0")),
                Some(_) => None,
            },
            FieldType::Id(allowed) => {
                let prefix = match value {
                    Value::Str(s) => s.split('_').next().unwrap_or_default(),
                    _ => "",
                };
                if allowed.iter().any(|e| e.prefix() == prefix) {
                    None
                } else {
                    Some(format!(
                        "'{value}' prefix doesn't match expected prefix '{}'",
                        prefixes(allowed, ",")
                    ))
                }
            }
            FieldType::CtVersion => match value {
                Value::CtVersion(v) if v.vm_version != 0 && v.abi_version != 0 => None,
                _ => Some(
                    "Value must be an object with \"vmVersion\" and \"abiVersion\" fields"
                        .to_string(),
                ),
            },
            FieldType::Pointers => match value {
                Value::Pointers(pointers) => {
                    if pointers.iter().any(|p| p.key.is_empty() || p.id.is_empty()) {
                        Some(
                            "Value must contains only object's like '{key: \"account_pubkey\", id: \"ak_lkamsflkalsdalksdlasdlasdlamd\"}'"
                                .to_string(),
                        )
                    } else if pointers.len() > MAX_POINTERS {
                        Some(format!(
                            "Expected {MAX_POINTERS} pointers or less, got {} instead",
                            pointers.len()
                        ))
                    } else {
                        None
                    }
                }
                _ => Some("Value must be of type Array".to_string()),
            },
            _ => None,
        }
    }

    /// Serialize a value, `params` gives access to sibling fields
    pub fn serialize(&self, value: Option<&Value>, params: &TxParams) -> Result<RlpItem, TxError> {
        let value = match (self, value) {
            (_, Some(value)) => value,
            (FieldType::Payload, None) => return Ok(RlpItem::empty()),
            (FieldType::NameFee, None) => {
                return Ok(write_int(&get_minimum_name_fee(name_param(params)?)?))
            }
            (FieldType::Deposit, None) => return Ok(write_int(&BigUint::zero())),
            (FieldType::GasPrice, None) => return Ok(write_int(&BigUint::from(MIN_GAS_PRICE))),
            (_, None) => {
                return Err(TxError::IllegalArgument(format!(
                    "Value for {self:?} field is missing"
                )))
            }
        };

        match self {
            FieldType::Int | FieldType::Amount => Ok(write_int(&expect_uint(value)?)),
            FieldType::Id(allowed) => write_allowed_id(expect_str(value, "an id")?, allowed),
            FieldType::Ids(allowed) => expect_list(value, "a list of ids")?
                .iter()
                .map(|id| write_allowed_id(expect_str(id, "an id")?, allowed))
                .collect::<Result<Vec<_>, _>>()
                .map(RlpItem::List),
            FieldType::Bool => match value {
                Value::Bool(b) => Ok(RlpItem::Bytes(vec![u8::from(*b)])),
                other => Err(unexpected("a bool", other)),
            },
            FieldType::Binary(encoding) => match value {
                Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
                other => Ok(RlpItem::Bytes(decode_as(
                    expect_str(other, encoding.prefix())?,
                    *encoding,
                )?)),
            },
            FieldType::StateTree => match value {
                Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
                other => Ok(RlpItem::Bytes(decode_as(
                    expect_str(other, "state trees")?,
                    Encoding::StateTrees,
                )?)),
            },
            FieldType::String | FieldType::Name => match value {
                Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
                other => Ok(RlpItem::Bytes(expect_str(other, "a string")?.as_bytes().to_vec())),
            },
            FieldType::Hex => {
                let s = expect_str(value, "a hex string")?;
                hex::decode(s)
                    .map(RlpItem::Bytes)
                    .map_err(|e| TxError::IllegalArgument(format!("Invalid hex string {s}: {e}")))
            }
            FieldType::RawBinary | FieldType::CallStack => match value {
                Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
                Value::Str(s) => Ok(RlpItem::Bytes(decode(s)?)),
                other => Err(unexpected("bytes", other)),
            },
            FieldType::RawBinaries => expect_list(value, "a list of bytes")?
                .iter()
                .map(|v| {
                    v.as_bytes()
                        .map(RlpItem::from)
                        .ok_or_else(|| unexpected("bytes", v))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RlpItem::List),
            FieldType::Signatures => expect_list(value, "a list of signatures")?
                .iter()
                .map(|v| match v {
                    Value::Bytes(bytes) if bytes.len() != SIGNATURE_LEN => Err(TxError::argument(
                        "Signature",
                        format!("{SIGNATURE_LEN} bytes"),
                        bytes.len(),
                    )),
                    Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
                    Value::Str(s) => Ok(RlpItem::Bytes(decode_as(s, Encoding::Signature)?)),
                    other => Err(unexpected("a signature", other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RlpItem::List),
            FieldType::Pointers => match value {
                Value::Pointers(pointers) => pointers
                    .iter()
                    .map(serialize_pointer)
                    .collect::<Result<Vec<_>, _>>()
                    .map(RlpItem::List),
                other => Err(unexpected("pointers", other)),
            },
            FieldType::Payload => match value {
                Value::Bytes(bytes) => Ok(RlpItem::Bytes(bytes.clone())),
                Value::Str(s) if s.split('_').next() == Some(Encoding::Bytearray.prefix()) => {
                    Ok(RlpItem::Bytes(decode_as(s, Encoding::Bytearray)?))
                }
                Value::Str(s) => Ok(RlpItem::Bytes(s.as_bytes().to_vec())),
                other => Err(unexpected("a payload", other)),
            },
            FieldType::RlpBinary => serialize_nested(value),
            FieldType::RlpBinaries | FieldType::OffChainUpdates => {
                expect_list(value, "a list of transactions")?
                    .iter()
                    .map(serialize_nested)
                    .collect::<Result<Vec<_>, _>>()
                    .map(RlpItem::List)
            }
            FieldType::MpTrees(..) => match value {
                Value::Trees(trees) => Ok(RlpItem::List(
                    trees.iter().map(MpTree::serialize).collect(),
                )),
                other => Err(unexpected("trees", other)),
            },
            FieldType::CallReturnType => {
                let return_type = match value {
                    Value::ReturnType(r) => *r,
                    Value::Str(s) => match s.as_str() {
                        "ok" => CallReturnType::Ok,
                        "error" => CallReturnType::Error,
                        "revert" => CallReturnType::Revert,
                        _ => return Err(unexpected("a call return type", value)),
                    },
                    other => return Err(unexpected("a call return type", other)),
                };
                Ok(RlpItem::Bytes(int::u64_to_bytes(u64::from(
                    return_type.as_u8(),
                ))))
            }
            FieldType::CtVersion => match value {
                Value::CtVersion(v) => {
                    Ok(RlpItem::Bytes(vec![v.vm_version, 0, v.abi_version]))
                }
                other => Err(unexpected("a ctVersion", other)),
            },
            FieldType::SophiaCodeTypeInfo => match value {
                Value::TypeInfo(functions) => Ok(RlpItem::List(
                    functions
                        .iter()
                        .map(|f| {
                            RlpItem::List(vec![
                                RlpItem::Bytes(f.fun_hash.clone()),
                                RlpItem::Bytes(f.name.as_bytes().to_vec()),
                                RlpItem::Bytes(f.arg_type.clone()),
                                RlpItem::Bytes(f.out_type.clone()),
                            ])
                        })
                        .collect(),
                )),
                other => Err(unexpected("type info", other)),
            },
            FieldType::NameId => {
                let name = expect_str(value, "a name or name id")?;
                let id = if is_name_valid(name) {
                    produce_name_id(name)?
                } else {
                    name.to_string()
                };
                write_allowed_id(&id, &[Encoding::Name])
            }
            FieldType::NameFee => {
                let fee = expect_uint(value)?;
                let required = get_minimum_name_fee(name_param(params)?)?;
                if required > fee {
                    return Err(TxError::InsufficientNameFee { fee, required });
                }
                Ok(write_int(&fee))
            }
            FieldType::Deposit => {
                let deposit = value.as_int().unwrap_or_else(|| BigInt::from(1));
                if !deposit.is_zero() {
                    return Err(TxError::IllegalArgument(format!(
                        "Contract deposit is not refundable, so it should be equal 0, got {value} instead"
                    )));
                }
                Ok(write_int(&BigUint::zero()))
            }
            FieldType::GasPrice => {
                let gas_price = expect_uint(value)?;
                if gas_price < BigUint::from(MIN_GAS_PRICE) {
                    return Err(TxError::IllegalArgument(format!(
                        "Gas price {value} must be bigger then {MIN_GAS_PRICE}"
                    )));
                }
                Ok(write_int(&gas_price))
            }
        }
    }

    /// Read a value back from its RLP form
    pub fn deserialize(
        &self,
        item: &RlpItem,
        unpacker: &Arc<dyn EntryUnpacker>,
    ) -> Result<Value, TxError> {
        match self {
            FieldType::Int
            | FieldType::Amount
            | FieldType::NameFee
            | FieldType::Deposit
            | FieldType::GasPrice => read_int(item),
            FieldType::Id(allowed) => read_allowed_id(item, allowed),
            FieldType::Ids(allowed) => list_of(item)?
                .iter()
                .map(|id| read_allowed_id(id, allowed))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            FieldType::Bool => Ok(Value::Bool(bytes_of(item)?.first() == Some(&1))),
            FieldType::Binary(encoding) => Ok(Value::Str(encode(bytes_of(item)?, *encoding)?)),
            FieldType::StateTree => Ok(Value::Str(encode(bytes_of(item)?, Encoding::StateTrees)?)),
            FieldType::String | FieldType::Name => text(item),
            FieldType::Hex => Ok(Value::Str(hex::encode(bytes_of(item)?))),
            FieldType::RawBinary | FieldType::CallStack => Ok(Value::Bytes(bytes_of(item)?.to_vec())),
            FieldType::RawBinaries | FieldType::Signatures => list_of(item)?
                .iter()
                .map(|v| Ok(Value::Bytes(bytes_of(v)?.to_vec())))
                .collect::<Result<Vec<_>, TxError>>()
                .map(Value::List),
            FieldType::Pointers => list_of(item)?
                .iter()
                .map(deserialize_pointer)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Pointers),
            FieldType::Payload => Ok(Value::Str(encode(bytes_of(item)?, Encoding::Bytearray)?)),
            FieldType::RlpBinary => Ok(Value::from(unpacker.unpack(bytes_of(item)?, None)?)),
            FieldType::RlpBinaries | FieldType::OffChainUpdates => list_of(item)?
                .iter()
                .map(|v| Ok(Value::from(unpacker.unpack(bytes_of(v)?, None)?)))
                .collect::<Result<Vec<_>, TxError>>()
                .map(Value::List),
            FieldType::MpTrees(encoding, tag) => list_of(item)?
                .iter()
                .map(|tree| MpTree::from_rlp(tree, *encoding, *tag, Arc::clone(unpacker)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Trees),
            FieldType::CallReturnType => {
                let raw = int::from_bytes(bytes_of(item)?);
                u8::try_from(&raw)
                    .ok()
                    .and_then(CallReturnType::from_u8)
                    .map(Value::ReturnType)
                    .ok_or_else(|| TxError::Decode(format!("Unknown call return type: {raw}")))
            }
            FieldType::CtVersion => match bytes_of(item)? {
                [vm, _, abi] => Ok(Value::CtVersion(CtVersion::new(*vm, *abi))),
                other => Err(TxError::Decode(format!(
                    "ctVersion should be 3 bytes, got {} instead",
                    other.len()
                ))),
            },
            FieldType::SophiaCodeTypeInfo => list_of(item)?
                .iter()
                .map(deserialize_type_info)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::TypeInfo),
            FieldType::NameId => read_allowed_id(item, &[Encoding::Name]),
        }
    }
}

fn name_param(params: &TxParams) -> Result<&str, TxError> {
    params
        .get_str("name")
        .ok_or_else(|| TxError::IllegalArgument("Name is required to compute the name fee".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaUnpacker;

    const ACCOUNT: &str = "ak_2dATVcZ9KJU5a8hdsVtTv21pYiGWiPbmVcU1Pz72FFqpk9pSRR";
    const ORACLE: &str = "ok_2dATVcZ9KJU5a8hdsVtTv21pYiGWiPbmVcU1Pz72FFqpk9pSRR";
    const ACCOUNT_ONLY: &[Encoding] = &[Encoding::AccountAddress];

    fn ser(kind: FieldType, value: impl Into<Value>) -> Result<RlpItem, TxError> {
        kind.serialize(Some(&value.into()), &TxParams::new())
    }

    fn de(kind: FieldType, item: &RlpItem) -> Value {
        let unpacker: Arc<dyn EntryUnpacker> = Arc::new(SchemaUnpacker);
        kind.deserialize(item, &unpacker).unwrap()
    }

    // ==================== Validation ====================

    #[test]
    fn test_required_field() {
        assert_eq!(FieldType::Int.validate(None).as_deref(), Some("Field is required"));
        assert_eq!(FieldType::Payload.validate(None), None);
        assert_eq!(FieldType::GasPrice.validate(None), None);
    }

    #[test]
    fn test_int_validation() {
        assert_eq!(FieldType::Int.validate(Some(&Value::from(5u64))), None);
        assert_eq!(FieldType::Int.validate(Some(&Value::from("42"))), None);
        assert_eq!(
            FieldType::Amount.validate(Some(&Value::from(-1i64))).as_deref(),
            Some("-1 must be >= 0")
        );
        assert_eq!(
            FieldType::Int.validate(Some(&Value::from("abc"))).as_deref(),
            Some("abc is not of type Number or BigNumber")
        );
    }

    #[test]
    fn test_id_validation() {
        const ALLOWED: &[Encoding] = &[Encoding::AccountAddress, Encoding::Name];
        assert_eq!(FieldType::Id(ALLOWED).validate(Some(&Value::from(ACCOUNT))), None);
        assert_eq!(
            FieldType::Id(ALLOWED).validate(Some(&Value::from(ORACLE))).unwrap(),
            format!("'{ORACLE}' prefix doesn't match expected prefix 'ak,nm'")
        );
    }

    #[test]
    fn test_ct_version_validation() {
        let ok = Value::from(CtVersion::FATE_2);
        assert_eq!(FieldType::CtVersion.validate(Some(&ok)), None);
        let missing = Value::from(CtVersion::new(7, 0));
        assert!(FieldType::CtVersion.validate(Some(&missing)).is_some());
        assert!(FieldType::CtVersion.validate(Some(&Value::from(7u64))).is_some());
    }

    #[test]
    fn test_pointer_validation() {
        let too_many = vec![Pointer::new("account_pubkey", ACCOUNT); 33];
        assert_eq!(
            FieldType::Pointers
                .validate(Some(&Value::from(too_many)))
                .as_deref(),
            Some("Expected 32 pointers or less, got 33 instead")
        );
        assert_eq!(
            FieldType::Pointers.validate(Some(&Value::from("x"))).as_deref(),
            Some("Value must be of type Array")
        );
        let empty_key = vec![Pointer::new("", ACCOUNT)];
        assert!(FieldType::Pointers
            .validate(Some(&Value::from(empty_key)))
            .is_some());
    }

    // ==================== Leaf codecs ====================

    #[test]
    fn test_int_zero_is_single_byte() {
        assert_eq!(ser(FieldType::Int, 0u64).unwrap(), RlpItem::Bytes(vec![0]));
        assert_eq!(de(FieldType::Int, &RlpItem::empty()), Value::from(0u64));
    }

    #[test]
    fn test_id_codec() {
        let item = ser(FieldType::Id(ACCOUNT_ONLY), ACCOUNT).unwrap();
        assert_eq!(item.as_bytes().unwrap()[0], 1);
        assert_eq!(de(FieldType::Id(ACCOUNT_ONLY), &item), Value::from(ACCOUNT));
    }

    #[test]
    fn test_id_wrong_encoding() {
        let err = ser(FieldType::Id(ACCOUNT_ONLY), ORACLE).unwrap_err();
        assert_eq!(err.to_string(), "Address encoding should be ak, got ok instead");
    }

    #[test]
    fn test_bool_codec() {
        let item = ser(FieldType::Bool, true).unwrap();
        assert_eq!(item, RlpItem::Bytes(vec![1]));
        assert_eq!(de(FieldType::Bool, &item), Value::Bool(true));
        assert_eq!(de(FieldType::Bool, &RlpItem::Bytes(vec![0])), Value::Bool(false));
    }

    #[test]
    fn test_payload_codec() {
        assert_eq!(
            ser(FieldType::Payload, "ba_AQIq9Y55kw==").unwrap(),
            RlpItem::Bytes(vec![1, 2, 42])
        );
        assert_eq!(
            ser(FieldType::Payload, "test").unwrap(),
            RlpItem::Bytes(b"test".to_vec())
        );
        assert_eq!(
            FieldType::Payload.serialize(None, &TxParams::new()).unwrap(),
            RlpItem::empty()
        );
        assert_eq!(
            de(FieldType::Payload, &RlpItem::Bytes(vec![1, 2, 42])),
            Value::from("ba_AQIq9Y55kw==")
        );
    }

    #[test]
    fn test_ct_version_codec() {
        let item = ser(FieldType::CtVersion, CtVersion::FATE_2).unwrap();
        assert_eq!(item, RlpItem::Bytes(vec![7, 0, 3]));
        assert_eq!(de(FieldType::CtVersion, &item), Value::from(CtVersion::FATE_2));
    }

    #[test]
    fn test_call_return_type_codec() {
        let item = ser(FieldType::CallReturnType, "revert").unwrap();
        assert_eq!(item, RlpItem::Bytes(vec![2]));
        assert_eq!(
            de(FieldType::CallReturnType, &item),
            Value::ReturnType(CallReturnType::Revert)
        );
    }

    #[test]
    fn test_pointers_codec() {
        let pointers = vec![Pointer::new("account_pubkey", ACCOUNT)];
        let item = ser(FieldType::Pointers, pointers.clone()).unwrap();
        let pair = &item.as_list().unwrap()[0];
        assert_eq!(pair.as_list().unwrap()[0], RlpItem::Bytes(b"account_pubkey".to_vec()));
        assert_eq!(de(FieldType::Pointers, &item), Value::from(pointers));
    }

    #[test]
    fn test_hex_codec() {
        let item = ser(FieldType::Hex, "0a0b").unwrap();
        assert_eq!(item, RlpItem::Bytes(vec![10, 11]));
        assert_eq!(de(FieldType::Hex, &item), Value::from("0a0b"));
        assert!(ser(FieldType::Hex, "zz").is_err());
    }

    #[test]
    fn test_type_info_codec() {
        let info = vec![FunctionTypeInfo {
            name: "init".to_string(),
            fun_hash: vec![0x44, 0xd6, 0x44, 0x1f],
            arg_type: vec![0x01],
            out_type: vec![0x02],
        }];
        let item = FieldType::SophiaCodeTypeInfo
            .serialize(Some(&Value::TypeInfo(info.clone())), &TxParams::new())
            .unwrap();
        let entry = item.as_list().unwrap()[0].as_list().unwrap();
        assert_eq!(entry[1], RlpItem::Bytes(b"init".to_vec()));
        assert_eq!(de(FieldType::SophiaCodeTypeInfo, &item), Value::TypeInfo(info));
    }

    // ==================== Defaulting fields ====================

    #[test]
    fn test_gas_price_default_and_minimum() {
        let item = FieldType::GasPrice.serialize(None, &TxParams::new()).unwrap();
        assert_eq!(item, RlpItem::Bytes(vec![0x3b, 0x9a, 0xca, 0x00]));
        let err = ser(FieldType::GasPrice, 999_999_999u64).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gas price 999999999 must be bigger then 1000000000"
        );
    }

    #[test]
    fn test_deposit_must_be_zero() {
        assert_eq!(
            FieldType::Deposit.serialize(None, &TxParams::new()).unwrap(),
            RlpItem::Bytes(vec![0])
        );
        let err = ser(FieldType::Deposit, 5u64).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Contract deposit is not refundable, so it should be equal 0, got 5 instead"
        );
    }

    #[test]
    fn test_name_fee() {
        let params = TxParams::new().with("name", "test123test.chain");
        let item = FieldType::NameFee.serialize(None, &params).unwrap();
        let fee = int::from_bytes(item.as_bytes().unwrap());
        assert_eq!(fee, get_minimum_name_fee("test123test.chain").unwrap());

        let err = FieldType::NameFee
            .serialize(Some(&Value::from(1u64)), &params)
            .unwrap_err();
        assert!(matches!(err, TxError::InsufficientNameFee { .. }));
    }

    #[test]
    fn test_name_id_accepts_name() {
        let item = ser(FieldType::NameId, "asdas.chain").unwrap();
        assert_eq!(
            de(FieldType::NameId, &item),
            Value::from("nm_2DMazuJNrGkQYve9eMttgdteaigeeuBk3fmRYSThJZ2NpX3r8R")
        );
    }

    // ==================== Lists ====================

    const SPEND: &str = "tx_+F0MAaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ChAeEyuPHdt6BOY7f6lkeaVLvFJaUxp/G8DOSSEhkDBn+wiBvBbWdOyAAAhg9e1n8oAAABhHRlc3QLK3OW";

    #[test]
    fn test_signatures_codec() {
        let item = ser(FieldType::Signatures, vec![Value::Bytes(vec![3u8; 64])]).unwrap();
        assert_eq!(
            de(FieldType::Signatures, &item),
            Value::List(vec![Value::Bytes(vec![3u8; 64])])
        );
    }

    #[test]
    fn test_signature_length() {
        let err = ser(FieldType::Signatures, vec![Value::Bytes(vec![0u8; 10])]).unwrap_err();
        assert!(matches!(err, TxError::Argument { .. }));
        assert_eq!(err.to_string(), "Signature should be 64 bytes, got 10 instead");
    }

    #[test]
    fn test_off_chain_updates_codec() {
        let item = ser(FieldType::OffChainUpdates, vec![Value::from(SPEND)]).unwrap();
        let Value::List(updates) = de(FieldType::OffChainUpdates, &item) else {
            panic!("expected a list of updates");
        };
        assert_eq!(updates.len(), 1);
        assert!(matches!(&updates[0], Value::Tx(tx) if tx.tag == Tag::SpendTx));
    }
}
