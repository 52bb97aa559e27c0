//! Transaction builder and unpacker

use std::sync::Arc;

use ae_crypto::hash;
use ae_encoding::{decode, encode};
use ae_primitives::{int, Encoding};
use ae_rlp::RlpItem;
use num_bigint::BigUint;

use crate::amount::{to_aettos, Denomination};
use crate::fee::{calculate_min_fee, DEFAULT_FEE_MAX_ITERATIONS};
use crate::field::{Field, FieldType};
use crate::helpers::MIN_GAS_PRICE;
use crate::schema::{deserialization_schema, serialization_schema, Schema};
use crate::{EntryUnpacker, FieldError, Tag, TxError, TxParams, UnpackedTx, Value};

const TTL_PARAMS: [&str; 3] = ["oracleTtl", "queryTtl", "responseTtl"];

/// Options of [`build_tx`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Schema version, the latest one if unset
    pub version: Option<u32>,
    /// Fields left out of the serialized form
    pub exclude_keys: Vec<String>,
    /// Prefix of the encoded result
    pub prefix: Encoding,
    /// Unit of `amount` fields
    pub denomination: Denomination,
    /// Gas price used for the automatic fee
    pub gas_price: BigUint,
    /// Iterations of the automatic fee calculation
    pub fee_max_iterations: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            version: None,
            exclude_keys: Vec::new(),
            prefix: Encoding::Transaction,
            denomination: Denomination::Aettos,
            gas_price: BigUint::from(MIN_GAS_PRICE),
            fee_max_iterations: DEFAULT_FEE_MAX_ITERATIONS,
        }
    }
}

impl BuildOptions {
    /// Build a specific schema version
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Leave a field out of the serialized form
    pub fn exclude(mut self, key: impl Into<String>) -> Self {
        self.exclude_keys.push(key.into());
        self
    }

    /// Encode the result with another prefix
    pub fn with_prefix(mut self, prefix: Encoding) -> Self {
        self.prefix = prefix;
        self
    }

    /// Interpret `amount` fields in another unit
    pub fn with_denomination(mut self, denomination: Denomination) -> Self {
        self.denomination = denomination;
        self
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.exclude_keys.iter().any(|k| k == key)
    }
}

/// Result of [`build_tx`]
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTx {
    /// Prefixed, checksummed encoding of `rlp`
    pub tx: String,
    /// RLP bytes
    pub rlp: Vec<u8>,
    /// Top-level RLP elements, tag and version first
    pub binary: Vec<RlpItem>,
    /// The transaction read back from `binary`
    pub tx_object: UnpackedTx,
}

/// Unpacks nested records with the schema registry
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaUnpacker;

impl EntryUnpacker for SchemaUnpacker {
    fn unpack(&self, rlp: &[u8], expected: Option<Tag>) -> Result<UnpackedTx, TxError> {
        unpack_tx_rlp(rlp, expected)
    }
}

fn unpacker() -> Arc<dyn EntryUnpacker> {
    Arc::new(SchemaUnpacker)
}

fn transform_params(
    mut params: TxParams,
    schema: &Schema,
    denomination: Denomination,
) -> Result<TxParams, TxError> {
    for key in TTL_PARAMS {
        if let Some(Value::Ttl(ttl)) = params.get(key).cloned() {
            params.remove(key);
            params.insert(format!("{key}Type"), ttl.kind_value());
            params.insert(format!("{key}Value"), ttl.value);
        }
    }
    if denomination != Denomination::Aettos {
        for field in schema.fields.iter().filter(|f| f.kind == FieldType::Amount) {
            let Some(value) = params.get(field.name) else {
                continue;
            };
            let scaled = match value {
                Value::Int(_) | Value::Str(_) => to_aettos(&value.to_string(), denomination)?,
                _ => continue,
            };
            params.insert(field.name, scaled);
        }
    }
    Ok(params)
}

fn validate(
    schema: &Schema,
    params: &TxParams,
    opts: &BuildOptions,
    auto_fee: bool,
) -> Result<(), TxError> {
    let errors: Vec<FieldError> = schema
        .fields
        .iter()
        .filter(|field| !opts.is_excluded(field.name))
        .filter(|field| !(auto_fee && field.name == "fee"))
        .filter_map(|field| {
            field
                .kind
                .validate(params.get(field.name))
                .map(|message| FieldError::new(field.name, message))
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TxError::Validation(errors))
    }
}

fn included_fields<'a>(schema: &'a Schema, opts: &'a BuildOptions) -> impl Iterator<Item = &'a Field> {
    schema
        .fields
        .iter()
        .filter(move |field| !opts.is_excluded(field.name))
}

fn serialize_tx(schema: &Schema, params: &TxParams, opts: &BuildOptions) -> Result<BuiltTx, TxError> {
    let mut binary = vec![
        RlpItem::Bytes(int::u64_to_bytes(u64::from(schema.tag.as_u16()))),
        RlpItem::Bytes(int::u64_to_bytes(u64::from(schema.version))),
    ];
    for field in included_fields(schema, opts) {
        binary.push(field.kind.serialize(params.get(field.name), params)?);
    }
    let rlp = RlpItem::List(binary.clone()).encode();
    let tx = encode(&rlp, opts.prefix)?;

    let unpacker = unpacker();
    let mut object = TxParams::new();
    for (field, item) in included_fields(schema, opts).zip(&binary[2..]) {
        object.insert(field.name, field.kind.deserialize(item, &unpacker)?);
    }
    let tx_object = UnpackedTx {
        tag: schema.tag,
        version: schema.version,
        params: object,
        rlp: rlp.clone(),
    };
    Ok(BuiltTx {
        tx,
        rlp,
        binary,
        tx_object,
    })
}

/// Build a transaction of type `tag` from `params`
///
/// Every schema field is validated first and all problems are reported
/// together. A missing `fee` is replaced by the minimum fee unless it is
/// excluded.
pub fn build_tx(params: &TxParams, tag: Tag, opts: &BuildOptions) -> Result<BuiltTx, TxError> {
    let schema = serialization_schema(tag, opts.version)?;
    let mut params = transform_params(params.clone(), schema, opts.denomination)?;
    let auto_fee =
        schema.has_field("fee") && !opts.is_excluded("fee") && !params.contains_key("fee");
    validate(schema, &params, opts, auto_fee)?;

    if auto_fee {
        let fee = calculate_min_fee(
            tag,
            |fee| {
                let mut with_fee = params.clone();
                with_fee.insert("fee", fee.clone());
                Ok(serialize_tx(schema, &with_fee, opts)?.tx_object)
            },
            &opts.gas_price,
            opts.fee_max_iterations,
        )?;
        params.insert("fee", fee);
    }

    let built = serialize_tx(schema, &params, opts)?;
    tracing::debug!(
        %tag,
        version = schema.version,
        size = built.rlp.len(),
        "built transaction"
    );
    Ok(built)
}

fn read_small_int<T: TryFrom<u64>>(item: &RlpItem, what: &str) -> Result<T, TxError> {
    let bytes = item
        .as_bytes()
        .ok_or_else(|| TxError::Decode(format!("Expected {what} bytes, got a list")))?;
    let value = int::from_bytes(bytes);
    u64::try_from(&value)
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| TxError::Decode(format!("{what} out of range: {value}")))
}

/// Unpack the RLP bytes of a record
///
/// When `expected` is given, a record with another tag is rejected before
/// any field is decoded.
pub fn unpack_tx_rlp(rlp: &[u8], expected: Option<Tag>) -> Result<UnpackedTx, TxError> {
    let item = ae_rlp::decode(rlp)?;
    let items = item
        .as_list()
        .ok_or_else(|| TxError::Decode("Expected an RLP list, got bytes".to_string()))?;
    let [tag_item, version_item, ..] = items else {
        return Err(TxError::Decode(format!(
            "Expected tag and version, got {} items",
            items.len()
        )));
    };
    let raw_tag: u16 = read_small_int(tag_item, "tag")?;
    let version: u32 = read_small_int(version_item, "version")?;
    let schema = deserialization_schema(raw_tag, version)?;

    if let Some(expected) = expected {
        if expected != schema.tag {
            return Err(TxError::Decode(format!(
                "Expected {expected} tag, got {} instead",
                schema.tag
            )));
        }
    }
    if items.len() != schema.rlp_len() {
        return Err(TxError::argument("RLP length", schema.rlp_len().to_string(), items.len()));
    }

    let unpacker = unpacker();
    let mut params = TxParams::new();
    for (field, item) in schema.fields.iter().zip(&items[2..]) {
        params.insert(field.name, field.kind.deserialize(item, &unpacker)?);
    }
    tracing::trace!(tag = %schema.tag, version, size = rlp.len(), "unpacked record");
    Ok(UnpackedTx {
        tag: schema.tag,
        version,
        params,
        rlp: rlp.to_vec(),
    })
}

/// Unpack an encoded transaction string
pub fn unpack_tx(encoded: &str, expected: Option<Tag>) -> Result<UnpackedTx, TxError> {
    unpack_tx_rlp(&decode(encoded)?, expected)
}

/// `th_` hash of RLP bytes
pub fn build_tx_hash_rlp(rlp: &[u8]) -> Result<String, TxError> {
    Ok(encode(hash(rlp).as_bytes(), Encoding::TxHash)?)
}

/// `th_` hash of an encoded transaction
pub fn build_tx_hash(encoded: &str) -> Result<String, TxError> {
    build_tx_hash_rlp(&decode(encoded)?)
}
