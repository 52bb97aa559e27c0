//! Encoding prefixes of checksummed identifiers
//!
//! Every encoded identifier looks like `<prefix>_<payload>`. The prefix
//! decides which alphabet carries the payload and, for some prefixes, the
//! exact length of the decoded bytes.

use std::fmt;
use std::str::FromStr;

use crate::PrimitiveError;

/// Alphabet used to carry the checksummed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// Bitcoin base58 alphabet
    Base58,
    /// Standard padded base64
    Base64,
}

/// Known identifier prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Encoding {
    /// `kh` key block hash
    KeyBlockHash,
    /// `mh` micro block hash
    MicroBlockHash,
    /// `bf` block proof of fraud hash
    BlockPofHash,
    /// `bx` block transactions hash
    BlockTxHash,
    /// `bs` block state hash
    BlockStateHash,
    /// `ch` channel id
    Channel,
    /// `ct` contract address
    ContractAddress,
    /// `cb` contract byte array
    ContractBytearray,
    /// `ck` contract store key
    ContractStoreKey,
    /// `cv` contract store value
    ContractStoreValue,
    /// `tx` transaction
    Transaction,
    /// `th` transaction hash
    TxHash,
    /// `ok` oracle address
    OracleAddress,
    /// `ov` oracle query
    OracleQuery,
    /// `oq` oracle query id
    OracleQueryId,
    /// `or` oracle response
    OracleResponse,
    /// `ak` account address
    AccountAddress,
    /// `sg` signature
    Signature,
    /// `cm` name commitment
    Commitment,
    /// `pp` peer public key
    PeerPubkey,
    /// `nm` name hash
    Name,
    /// `st` state hash
    State,
    /// `pi` proof of inclusion
    Poi,
    /// `ss` state trees
    StateTrees,
    /// `cs` call state tree
    CallStateTree,
    /// `ba` generic byte array
    Bytearray,
}

impl Encoding {
    /// Every known prefix, base58 ones first
    pub const ALL: [Encoding; 26] = [
        Encoding::AccountAddress,
        Encoding::BlockPofHash,
        Encoding::BlockStateHash,
        Encoding::BlockTxHash,
        Encoding::Channel,
        Encoding::Commitment,
        Encoding::ContractAddress,
        Encoding::KeyBlockHash,
        Encoding::MicroBlockHash,
        Encoding::Name,
        Encoding::OracleAddress,
        Encoding::OracleQueryId,
        Encoding::PeerPubkey,
        Encoding::Signature,
        Encoding::TxHash,
        Encoding::Bytearray,
        Encoding::ContractBytearray,
        Encoding::OracleResponse,
        Encoding::OracleQuery,
        Encoding::Poi,
        Encoding::StateTrees,
        Encoding::CallStateTree,
        Encoding::ContractStoreKey,
        Encoding::ContractStoreValue,
        Encoding::State,
        Encoding::Transaction,
    ];

    /// Two-letter prefix
    pub const fn prefix(self) -> &'static str {
        match self {
            Encoding::KeyBlockHash => "kh",
            Encoding::MicroBlockHash => "mh",
            Encoding::BlockPofHash => "bf",
            Encoding::BlockTxHash => "bx",
            Encoding::BlockStateHash => "bs",
            Encoding::Channel => "ch",
            Encoding::ContractAddress => "ct",
            Encoding::ContractBytearray => "cb",
            Encoding::ContractStoreKey => "ck",
            Encoding::ContractStoreValue => "cv",
            Encoding::Transaction => "tx",
            Encoding::TxHash => "th",
            Encoding::OracleAddress => "ok",
            Encoding::OracleQuery => "ov",
            Encoding::OracleQueryId => "oq",
            Encoding::OracleResponse => "or",
            Encoding::AccountAddress => "ak",
            Encoding::Signature => "sg",
            Encoding::Commitment => "cm",
            Encoding::PeerPubkey => "pp",
            Encoding::Name => "nm",
            Encoding::State => "st",
            Encoding::Poi => "pi",
            Encoding::StateTrees => "ss",
            Encoding::CallStateTree => "cs",
            Encoding::Bytearray => "ba",
        }
    }

    /// Look up an encoding by its prefix
    pub fn from_prefix(prefix: &str) -> Result<Self, PrimitiveError> {
        Self::ALL
            .iter()
            .copied()
            .find(|encoding| encoding.prefix() == prefix)
            .ok_or_else(|| PrimitiveError::PrefixNotFound(prefix.to_string()))
    }

    /// Alphabet carrying the payload
    pub const fn alphabet(self) -> Alphabet {
        match self {
            Encoding::Bytearray
            | Encoding::ContractBytearray
            | Encoding::OracleResponse
            | Encoding::OracleQuery
            | Encoding::Poi
            | Encoding::StateTrees
            | Encoding::CallStateTree
            | Encoding::ContractStoreKey
            | Encoding::ContractStoreValue
            | Encoding::State
            | Encoding::Transaction => Alphabet::Base64,
            _ => Alphabet::Base58,
        }
    }

    /// Exact decoded length, if the prefix constrains it
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            Encoding::AccountAddress
            | Encoding::Channel
            | Encoding::Commitment
            | Encoding::ContractAddress
            | Encoding::KeyBlockHash
            | Encoding::MicroBlockHash
            | Encoding::OracleAddress
            | Encoding::OracleQueryId
            | Encoding::TxHash => Some(32),
            Encoding::Signature => Some(64),
            _ => None,
        }
    }

    /// Tag used when the identifier is written as an `id` field
    pub const fn id_tag(self) -> Option<IdTag> {
        match self {
            Encoding::AccountAddress => Some(IdTag::Account),
            Encoding::Name => Some(IdTag::Name),
            Encoding::Commitment => Some(IdTag::Commitment),
            Encoding::OracleAddress => Some(IdTag::Oracle),
            Encoding::ContractAddress => Some(IdTag::Contract),
            Encoding::Channel => Some(IdTag::Channel),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Encoding {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_prefix(s)
    }
}

/// One-byte tag in front of the 32-byte hash of an `id` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IdTag {
    /// Account public key
    Account = 1,
    /// Name hash
    Name = 2,
    /// Name commitment
    Commitment = 3,
    /// Oracle public key
    Oracle = 4,
    /// Contract address
    Contract = 5,
    /// Channel id
    Channel = 6,
}

impl IdTag {
    /// Parse a raw tag byte
    pub fn from_u8(tag: u8) -> Result<Self, PrimitiveError> {
        match tag {
            1 => Ok(IdTag::Account),
            2 => Ok(IdTag::Name),
            3 => Ok(IdTag::Commitment),
            4 => Ok(IdTag::Oracle),
            5 => Ok(IdTag::Contract),
            6 => Ok(IdTag::Channel),
            other => Err(PrimitiveError::IdTagNotFound(other)),
        }
    }

    /// Prefix of identifiers carrying this tag
    pub const fn encoding(self) -> Encoding {
        match self {
            IdTag::Account => Encoding::AccountAddress,
            IdTag::Name => Encoding::Name,
            IdTag::Commitment => Encoding::Commitment,
            IdTag::Oracle => Encoding::OracleAddress,
            IdTag::Contract => Encoding::ContractAddress,
            IdTag::Channel => Encoding::Channel,
        }
    }
}
