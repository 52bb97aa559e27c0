//! Logical field values
//!
//! Values are what callers put into a [`TxParams`] map before building and
//! what they get back after unpacking. Which variant a field takes is
//! decided by its [`FieldType`](crate::FieldType).

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};

use crate::{MpTree, Tag};

/// Outcome of a contract call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallReturnType {
    /// Call succeeded
    Ok,
    /// Call failed
    Error,
    /// Call reverted
    Revert,
}

impl CallReturnType {
    /// Wire value
    pub const fn as_u8(self) -> u8 {
        match self {
            CallReturnType::Ok => 0,
            CallReturnType::Error => 1,
            CallReturnType::Revert => 2,
        }
    }

    /// Parse a wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CallReturnType::Ok),
            1 => Some(CallReturnType::Error),
            2 => Some(CallReturnType::Revert),
            _ => None,
        }
    }
}

impl fmt::Display for CallReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CallReturnType::Ok => "ok",
            CallReturnType::Error => "error",
            CallReturnType::Revert => "revert",
        })
    }
}

/// Virtual machine and ABI versions of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtVersion {
    /// VM version
    pub vm_version: u8,
    /// ABI version
    pub abi_version: u8,
}

impl CtVersion {
    /// FATE 2 with the FATE ABI
    pub const FATE_2: CtVersion = CtVersion {
        vm_version: 7,
        abi_version: 3,
    };

    /// Create a new version pair
    pub const fn new(vm_version: u8, abi_version: u8) -> Self {
        Self {
            vm_version,
            abi_version,
        }
    }
}

/// AENS pointer from a key to an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    /// Pointer key, e.g. `account_pubkey`
    pub key: String,
    /// Encoded identifier
    pub id: String,
}

impl Pointer {
    /// Create a new pointer
    pub fn new(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: id.into(),
        }
    }
}

/// How a TTL value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlKind {
    /// Relative to the current height
    Delta,
    /// Absolute height
    Block,
}

/// Oracle, query or response TTL before it is split into two int fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl {
    /// Interpretation of `value`
    pub kind: TtlKind,
    /// Number of blocks
    pub value: u64,
}

impl Ttl {
    /// Relative TTL
    pub const fn delta(value: u64) -> Self {
        Self {
            kind: TtlKind::Delta,
            value,
        }
    }

    /// Absolute TTL
    pub const fn block(value: u64) -> Self {
        Self {
            kind: TtlKind::Block,
            value,
        }
    }

    /// Wire value of the kind
    pub const fn kind_value(&self) -> u8 {
        match self.kind {
            TtlKind::Delta => 0,
            TtlKind::Block => 1,
        }
    }
}

/// Type information of one compiled contract function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTypeInfo {
    /// Function name
    pub name: String,
    /// Function hash
    pub fun_hash: Vec<u8>,
    /// Serialized argument type
    pub arg_type: Vec<u8>,
    /// Serialized return type
    pub out_type: Vec<u8>,
}

/// A field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer, negative values only exist to be rejected by validation
    Int(BigInt),
    /// Text, encoded identifiers and hex strings
    Str(String),
    /// Boolean flag
    Bool(bool),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Homogeneous list
    List(Vec<Value>),
    /// AENS pointers
    Pointers(Vec<Pointer>),
    /// Contract VM/ABI version
    CtVersion(CtVersion),
    /// Contract call outcome
    ReturnType(CallReturnType),
    /// Oracle TTL, expanded before validation
    Ttl(Ttl),
    /// Nested record
    Tx(Box<UnpackedTx>),
    /// Merkle Patricia trees of a proof
    Trees(Vec<MpTree>),
    /// Contract function type information
    TypeInfo(Vec<FunctionTypeInfo>),
}

impl Value {
    /// Integer view, numeric strings included
    pub fn as_int(&self) -> Option<BigInt> {
        match self {
            Value::Int(n) => Some(n.clone()),
            Value::Str(s) => BigInt::parse_bytes(s.as_bytes(), 10),
            _ => None,
        }
    }

    /// Non-negative integer view
    pub fn as_uint(&self) -> Option<BigUint> {
        self.as_int().and_then(|n| n.to_biguint())
    }

    /// String view
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Bytes view
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Boolean view
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// List view
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Nested record view
    pub fn as_tx(&self) -> Option<&UnpackedTx> {
        match self {
            Value::Tx(tx) => Some(tx),
            _ => None,
        }
    }

    /// Tree list view
    pub fn as_trees(&self) -> Option<&[MpTree]> {
        match self {
            Value::Trees(trees) => Some(trees),
            _ => None,
        }
    }

    /// Short name of the variant, used in validation messages
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Pointers(_) => "pointers",
            Value::CtVersion(_) => "ctVersion",
            Value::ReturnType(_) => "callReturnType",
            Value::Ttl(_) => "ttl",
            Value::Tx(_) => "transaction",
            Value::Trees(_) => "trees",
            Value::TypeInfo(_) => "typeInfo",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Value::ReturnType(r) => write!(f, "{r}"),
            other => write!(f, "{other:?}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(BigInt::from(v))
            }
        })*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, i32, i64, usize, BigInt);

impl From<BigUint> for Value {
    fn from(v: BigUint) -> Self {
        Value::Int(BigInt::from_biguint(Sign::Plus, v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Vec<Pointer>> for Value {
    fn from(v: Vec<Pointer>) -> Self {
        Value::Pointers(v)
    }
}

impl From<CtVersion> for Value {
    fn from(v: CtVersion) -> Self {
        Value::CtVersion(v)
    }
}

impl From<CallReturnType> for Value {
    fn from(v: CallReturnType) -> Self {
        Value::ReturnType(v)
    }
}

impl From<Ttl> for Value {
    fn from(v: Ttl) -> Self {
        Value::Ttl(v)
    }
}

impl From<UnpackedTx> for Value {
    fn from(v: UnpackedTx) -> Self {
        Value::Tx(Box::new(v))
    }
}

impl From<Vec<MpTree>> for Value {
    fn from(v: Vec<MpTree>) -> Self {
        Value::Trees(v)
    }
}

/// Named field values of a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxParams(BTreeMap<String, Value>);

impl TxParams {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Remove a value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Check whether a key is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Integer value of a key
    pub fn get_int(&self, key: &str) -> Option<BigInt> {
        self.get(key).and_then(Value::as_int)
    }

    /// String value of a key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TxParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for TxParams {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A record decoded against its schema
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackedTx {
    /// Object tag
    pub tag: Tag,
    /// Schema version
    pub version: u32,
    /// Field values by name
    pub params: TxParams,
    /// RLP bytes the record was decoded from
    pub rlp: Vec<u8>,
}

impl UnpackedTx {
    /// Field value by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}
