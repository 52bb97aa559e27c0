//! Versioned schema registry
//!
//! Each `(tag, version)` pair maps to the ordered list of fields that
//! follow the tag and version on the wire. The registry is built once on
//! first use and never changes afterwards.

use std::collections::HashMap;

use ae_primitives::Encoding;
use once_cell::sync::Lazy;

use crate::field::{Field, FieldType};
use crate::{Tag, TxError};

use ae_primitives::Encoding::{
    AccountAddress as AK, Channel as CH, Commitment as CM, ContractAddress as CT,
    ContractBytearray as CB, Name as NM, OracleAddress as OK,
};
use crate::field::FieldType::*;

const ACCOUNT: &[Encoding] = &[AK];
const ACCOUNT_OR_NAME: &[Encoding] = &[AK, NM];
const CONTRACT: &[Encoding] = &[CT];
const CONTRACT_OR_NAME: &[Encoding] = &[CT, NM];
const ORACLE: &[Encoding] = &[OK];
const ORACLE_OR_NAME: &[Encoding] = &[OK, NM];
const COMMITMENT: &[Encoding] = &[CM];
const CHANNEL: &[Encoding] = &[CH];
const ANY_ID: &[Encoding] = &[AK, NM, CM, OK, CT, CH];

/// Ordered field layout of one object version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Object tag
    pub tag: Tag,
    /// Schema version
    pub version: u32,
    /// Fields after the tag and version
    pub fields: Vec<Field>,
}

impl Schema {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether the schema has a field
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of RLP elements of a serialized object, tag and version included
    pub fn rlp_len(&self) -> usize {
        self.fields.len() + 2
    }
}

fn f(name: &'static str, kind: FieldType) -> Field {
    Field::new(name, kind)
}

fn channel_payload_fields() -> Vec<Field> {
    vec![
        f("channelId", Id(CHANNEL)),
        f("fromId", Id(ACCOUNT)),
        f("payload", Binary(Encoding::Transaction)),
        f("poi", Binary(Encoding::Poi)),
        f("ttl", Int),
        f("fee", Int),
        f("nonce", Int),
    ]
}

fn channel_final_amounts() -> Vec<Field> {
    vec![
        f("channelId", Id(CHANNEL)),
        f("fromId", Id(ACCOUNT)),
        f("initiatorAmountFinal", Int),
        f("responderAmountFinal", Int),
        f("ttl", Int),
        f("fee", Int),
        f("nonce", Int),
    ]
}

fn definitions() -> Vec<(Tag, u32, Vec<Field>)> {
    vec![
        (Tag::Account, 1, vec![f("nonce", Int), f("balance", Int)]),
        (
            Tag::Account,
            2,
            vec![
                f("flags", Int),
                f("nonce", Int),
                f("balance", Int),
                f("gaContract", Id(CONTRACT_OR_NAME)),
                f("gaAuthFun", Binary(CB)),
            ],
        ),
        (
            Tag::SignedTx,
            1,
            vec![f("signatures", Signatures), f("encodedTx", RlpBinary)],
        ),
        (
            Tag::SpendTx,
            1,
            vec![
                f("senderId", Id(ACCOUNT)),
                f("recipientId", Id(ACCOUNT_OR_NAME)),
                f("amount", Amount),
                f("fee", Int),
                f("ttl", Int),
                f("nonce", Int),
                f("payload", Payload),
            ],
        ),
        (
            Tag::NamePreclaimTx,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nonce", Int),
                f("commitmentId", Id(COMMITMENT)),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::NameClaimTx,
            2,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nonce", Int),
                f("name", Name),
                f("nameSalt", Int),
                f("nameFee", NameFee),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::NameUpdateTx,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nonce", Int),
                f("nameId", NameId),
                f("nameTtl", Int),
                f("pointers", Pointers),
                f("clientTtl", Int),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::NameTransferTx,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nonce", Int),
                f("nameId", NameId),
                f("recipientId", Id(ACCOUNT_OR_NAME)),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::NameRevokeTx,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nonce", Int),
                f("nameId", NameId),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::Contract,
            1,
            vec![
                f("owner", Id(ACCOUNT)),
                f("ctVersion", CtVersion),
                f("code", Binary(CB)),
                f("log", Binary(CB)),
                f("active", Bool),
                f("referers", Ids(ACCOUNT)),
                f("deposit", Deposit),
            ],
        ),
        (
            Tag::ContractCreateTx,
            1,
            vec![
                f("ownerId", Id(ACCOUNT)),
                f("nonce", Int),
                f("code", Binary(CB)),
                f("ctVersion", CtVersion),
                f("fee", Int),
                f("ttl", Int),
                f("deposit", Deposit),
                f("amount", Amount),
                f("gasLimit", Int),
                f("gasPrice", GasPrice),
                f("callData", Binary(CB)),
            ],
        ),
        (
            Tag::ContractCallTx,
            1,
            vec![
                f("callerId", Id(ACCOUNT)),
                f("nonce", Int),
                f("contractId", Id(CONTRACT_OR_NAME)),
                f("abiVersion", Int),
                f("fee", Int),
                f("ttl", Int),
                f("amount", Amount),
                f("gasLimit", Int),
                f("gasPrice", GasPrice),
                f("callData", Binary(CB)),
            ],
        ),
        (
            Tag::ContractCall,
            1,
            vec![
                f("callerId", Id(ACCOUNT)),
                f("callerNonce", Int),
                f("height", Int),
                f("contractId", Id(CONTRACT)),
                f("gasPrice", GasPrice),
                f("gasUsed", Int),
                f("returnValue", Binary(CB)),
                f("returnType", CallReturnType),
                f("log", RawBinaries),
            ],
        ),
        (
            Tag::OracleRegisterTx,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nonce", Int),
                f("queryFormat", String),
                f("responseFormat", String),
                f("queryFee", Amount),
                f("oracleTtlType", Int),
                f("oracleTtlValue", Int),
                f("fee", Int),
                f("ttl", Int),
                f("abiVersion", Int),
            ],
        ),
        (
            Tag::OracleExtendTx,
            1,
            vec![
                f("oracleId", Id(ORACLE_OR_NAME)),
                f("nonce", Int),
                f("oracleTtlType", Int),
                f("oracleTtlValue", Int),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::OracleQueryTx,
            1,
            vec![
                f("senderId", Id(ACCOUNT)),
                f("nonce", Int),
                f("oracleId", Id(ORACLE_OR_NAME)),
                f("query", String),
                f("queryFee", Amount),
                f("queryTtlType", Int),
                f("queryTtlValue", Int),
                f("responseTtlType", Int),
                f("responseTtlValue", Int),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::OracleResponseTx,
            1,
            vec![
                f("oracleId", Id(ORACLE)),
                f("nonce", Int),
                f("queryId", Binary(Encoding::OracleQueryId)),
                f("response", String),
                f("responseTtlType", Int),
                f("responseTtlValue", Int),
                f("fee", Int),
                f("ttl", Int),
            ],
        ),
        (
            Tag::ChannelCreateTx,
            2,
            vec![
                f("initiator", Id(ACCOUNT)),
                f("initiatorAmount", Int),
                f("responder", Id(ACCOUNT)),
                f("responderAmount", Int),
                f("channelReserve", Int),
                f("lockPeriod", Int),
                f("ttl", Int),
                f("fee", Int),
                f("initiatorDelegateIds", Ids(ANY_ID)),
                f("responderDelegateIds", Ids(ANY_ID)),
                f("stateHash", Binary(Encoding::State)),
                f("nonce", Int),
            ],
        ),
        (Tag::ChannelCloseMutualTx, 1, channel_final_amounts()),
        (Tag::ChannelCloseSoloTx, 1, channel_payload_fields()),
        (Tag::ChannelSlashTx, 1, channel_payload_fields()),
        (
            Tag::ChannelDepositTx,
            1,
            vec![
                f("channelId", Id(CHANNEL)),
                f("fromId", Id(ACCOUNT)),
                f("amount", Int),
                f("ttl", Int),
                f("fee", Int),
                f("stateHash", Binary(Encoding::State)),
                f("round", Int),
                f("nonce", Int),
            ],
        ),
        (
            Tag::ChannelWithdrawTx,
            1,
            vec![
                f("channelId", Id(CHANNEL)),
                f("toId", Id(ACCOUNT)),
                f("amount", Int),
                f("ttl", Int),
                f("fee", Int),
                f("stateHash", Binary(Encoding::State)),
                f("round", Int),
                f("nonce", Int),
            ],
        ),
        (Tag::ChannelSettleTx, 1, channel_final_amounts()),
        (
            Tag::ChannelForceProgressTx,
            1,
            vec![
                f("channelId", Id(CHANNEL)),
                f("fromId", Id(ACCOUNT)),
                f("payload", Binary(Encoding::Transaction)),
                f("round", Int),
                f("update", Binary(CB)),
                f("stateHash", Binary(Encoding::State)),
                f("offChainTrees", StateTree),
                f("ttl", Int),
                f("fee", Int),
                f("nonce", Int),
            ],
        ),
        (
            Tag::ChannelOffChainTx,
            2,
            vec![
                f("channelId", Id(CHANNEL)),
                f("round", Int),
                f("stateHash", Binary(Encoding::State)),
            ],
        ),
        (
            Tag::Channel,
            3,
            vec![
                f("initiator", Id(ACCOUNT)),
                f("responder", Id(ACCOUNT)),
                f("channelAmount", Int),
                f("initiatorAmount", Int),
                f("responderAmount", Int),
                f("channelReserve", Int),
                f("initiatorDelegateIds", Ids(ANY_ID)),
                f("responderDelegateIds", Ids(ANY_ID)),
                f("stateHash", Binary(Encoding::State)),
                f("round", Int),
                f("soloRound", Int),
                f("lockPeriod", Int),
                f("lockedUntil", Int),
                f("initiatorAuth", Binary(CB)),
                f("responderAuth", Binary(CB)),
            ],
        ),
        (
            Tag::ChannelSnapshotSoloTx,
            1,
            vec![
                f("channelId", Id(CHANNEL)),
                f("fromId", Id(ACCOUNT)),
                f("payload", Binary(Encoding::Transaction)),
                f("ttl", Int),
                f("fee", Int),
                f("nonce", Int),
            ],
        ),
        (
            Tag::ChannelOffChainUpdateTransfer,
            1,
            vec![f("from", Id(ACCOUNT)), f("to", Id(ACCOUNT)), f("amount", Int)],
        ),
        (
            Tag::ChannelOffChainUpdateDeposit,
            1,
            vec![f("from", Id(ACCOUNT)), f("amount", Int)],
        ),
        (
            Tag::ChannelOffChainUpdateWithdraw,
            1,
            vec![f("from", Id(ACCOUNT)), f("amount", Int)],
        ),
        (
            Tag::ChannelOffChainUpdateCreateContract,
            1,
            vec![
                f("owner", Id(ACCOUNT)),
                f("ctVersion", CtVersion),
                f("code", Binary(CB)),
                f("deposit", Int),
                f("callData", Binary(CB)),
            ],
        ),
        (
            Tag::ChannelOffChainUpdateCallContract,
            1,
            vec![
                f("caller", Id(ACCOUNT)),
                f("contract", Id(CONTRACT)),
                f("abiVersion", Int),
                f("amount", Int),
                f("callData", Binary(CB)),
                f("callStack", CallStack),
                f("gasPrice", GasPrice),
                f("gasLimit", Int),
            ],
        ),
        (
            Tag::ChannelClientReconnectTx,
            1,
            vec![
                f("channelId", Id(CHANNEL)),
                f("round", Int),
                f("role", String),
                f("pubkey", Id(ACCOUNT)),
            ],
        ),
        (
            Tag::TreesPoi,
            1,
            vec![
                f("accounts", MpTrees(AK, Tag::Account)),
                f("calls", MpTrees(Encoding::Bytearray, Tag::ContractCall)),
                f("channels", MpTrees(CH, Tag::Channel)),
                f("contracts", MpTrees(CT, Tag::Contract)),
                f("ns", MpTrees(NM, Tag::Name)),
                f("oracles", MpTrees(OK, Tag::Oracle)),
            ],
        ),
        (
            Tag::StateTrees,
            1,
            vec![
                f("contracts", RlpBinary),
                f("calls", RlpBinary),
                f("channels", RlpBinary),
                f("ns", RlpBinary),
                f("oracles", RlpBinary),
                f("accounts", RlpBinary),
            ],
        ),
        (Tag::Mtree, 1, vec![f("values", RlpBinaries)]),
        (
            Tag::MtreeValue,
            1,
            vec![f("key", Hex), f("value", RawBinary)],
        ),
        (Tag::ContractsMtree, 1, vec![f("contracts", RlpBinary)]),
        (Tag::CallsMtree, 1, vec![f("calls", RlpBinary)]),
        (Tag::ChannelsMtree, 1, vec![f("channels", RlpBinary)]),
        (Tag::NameserviceMtree, 1, vec![f("mtree", RlpBinary)]),
        (Tag::OraclesMtree, 1, vec![f("otree", RlpBinary)]),
        (Tag::AccountsMtree, 1, vec![f("accounts", RlpBinary)]),
        (
            Tag::Oracle,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("queryFormat", String),
                f("responseFormat", String),
                f("queryFee", Int),
                f("oracleTtlValue", Int),
                f("abiVersion", Int),
            ],
        ),
        (
            Tag::Name,
            1,
            vec![
                f("accountId", Id(ACCOUNT)),
                f("nameTtl", Int),
                f("status", RawBinary),
                f("clientTtl", Int),
                f("pointers", Pointers),
            ],
        ),
        (
            Tag::SophiaByteCode,
            3,
            vec![
                f("sourceCodeHash", RawBinary),
                f("typeInfo", SophiaCodeTypeInfo),
                f("byteCode", RawBinary),
                f("compilerVersion", String),
                f("payable", Bool),
            ],
        ),
        (
            Tag::GaAttachTx,
            1,
            vec![
                f("ownerId", Id(ACCOUNT)),
                f("nonce", Int),
                f("code", Binary(CB)),
                f("authFun", RawBinary),
                f("ctVersion", CtVersion),
                f("fee", Int),
                f("ttl", Int),
                f("gasLimit", Int),
                f("gasPrice", GasPrice),
                f("callData", Binary(CB)),
            ],
        ),
        (
            Tag::GaMetaTx,
            2,
            vec![
                f("gaId", Id(ACCOUNT)),
                f("authData", Binary(CB)),
                f("abiVersion", Int),
                f("fee", Int),
                f("gasLimit", Int),
                f("gasPrice", GasPrice),
                f("tx", RlpBinary),
            ],
        ),
        (
            Tag::PayingForTx,
            1,
            vec![
                f("payerId", Id(ACCOUNT)),
                f("nonce", Int),
                f("fee", Int),
                f("tx", RlpBinary),
            ],
        ),
        (
            Tag::GaMetaTxAuthData,
            1,
            vec![
                f("fee", Int),
                f("gasPrice", GasPrice),
                f("txHash", Binary(Encoding::TxHash)),
            ],
        ),
    ]
}

static SCHEMAS: Lazy<HashMap<(Tag, u32), Schema>> = Lazy::new(|| {
    definitions()
        .into_iter()
        .map(|(tag, version, fields)| {
            (
                (tag, version),
                Schema {
                    tag,
                    version,
                    fields,
                },
            )
        })
        .collect()
});

static LATEST: Lazy<HashMap<Tag, u32>> = Lazy::new(|| {
    let mut latest: HashMap<Tag, u32> = HashMap::new();
    for &(tag, version) in SCHEMAS.keys() {
        let entry = latest.entry(tag).or_insert(version);
        *entry = (*entry).max(version);
    }
    latest
});

/// Schema of a tag and version
pub fn schema(tag: Tag, version: u32) -> Option<&'static Schema> {
    SCHEMAS.get(&(tag, version))
}

/// Highest version registered for a tag
pub fn latest_version(tag: Tag) -> Option<u32> {
    LATEST.get(&tag).copied()
}

/// Every registered schema, in no particular order
pub fn all_schemas() -> impl Iterator<Item = &'static Schema> {
    SCHEMAS.values()
}

/// Schema used to build an object, the latest one if no version is given
pub fn serialization_schema(tag: Tag, version: Option<u32>) -> Result<&'static Schema, TxError> {
    let Some(latest) = latest_version(tag) else {
        return Err(TxError::SchemaNotFound(format!(
            "Transaction serialization not implemented for {tag}"
        )));
    };
    let version = version.unwrap_or(latest);
    schema(tag, version).ok_or_else(|| {
        TxError::SchemaNotFound(format!(
            "Transaction serialization not implemented for {tag} version {version}"
        ))
    })
}

/// Schema used to read an object with a raw tag and version
pub fn deserialization_schema(tag: u16, version: u32) -> Result<&'static Schema, TxError> {
    let known = Tag::from_u16(tag).filter(|tag| latest_version(*tag).is_some());
    let Some(known) = known else {
        return Err(TxError::SchemaNotFound(format!(
            "Transaction deserialization not implemented for tag {tag}"
        )));
    };
    schema(known, version).ok_or_else(|| {
        TxError::SchemaNotFound(format!(
            "Transaction deserialization not implemented for tag {tag} version {version}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_has_a_schema() {
        for tag in Tag::ALL {
            assert!(latest_version(*tag).is_some(), "missing schema for {tag}");
        }
    }

    #[test]
    fn test_latest_versions() {
        assert_eq!(latest_version(Tag::Account), Some(2));
        assert_eq!(latest_version(Tag::SpendTx), Some(1));
        assert_eq!(latest_version(Tag::NameClaimTx), Some(2));
        assert_eq!(latest_version(Tag::Channel), Some(3));
        assert_eq!(latest_version(Tag::SophiaByteCode), Some(3));
    }

    #[test]
    fn test_spend_layout() {
        let schema = serialization_schema(Tag::SpendTx, None).unwrap();
        let names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["senderId", "recipientId", "amount", "fee", "ttl", "nonce", "payload"]
        );
        assert_eq!(schema.rlp_len(), 9);
        assert!(schema.has_field("fee"));
    }

    #[test]
    fn test_close_mutual_layout() {
        let schema = schema(Tag::ChannelCloseMutualTx, 1).unwrap();
        assert_eq!(schema.fields[0].name, "channelId");
        assert_eq!(schema.fields[1].name, "fromId");
        assert_eq!(schema.fields[2].name, "initiatorAmountFinal");
    }

    #[test]
    fn test_serialization_schema_not_found() {
        let err = serialization_schema(Tag::SpendTx, Some(5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transaction serialization not implemented for SpendTx version 5"
        );
    }

    #[test]
    fn test_deserialization_schema_not_found() {
        let err = deserialization_schema(10, 99).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transaction deserialization not implemented for tag 10 version 99"
        );
        let err = deserialization_schema(13, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transaction deserialization not implemented for tag 13"
        );
    }

    #[test]
    fn test_field_names_are_unique() {
        for schema in all_schemas() {
            let mut names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), schema.fields.len(), "{} v{}", schema.tag, schema.version);
        }
    }
}
