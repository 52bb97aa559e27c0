//! Object tags
//!
//! The first RLP element of every serialized object. Transactions and
//! ledger entries (accounts, trees, channel updates) share one numbering.

use std::fmt;

macro_rules! tags {
    ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
        /// Object tag of a serialized record
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Tag {
            $($(#[$meta])* $name = $value,)*
        }

        impl Tag {
            /// Every known tag in ascending order
            pub const ALL: &'static [Tag] = &[$(Tag::$name,)*];

            /// Parse a numeric tag
            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $($value => Some(Tag::$name),)*
                    _ => None,
                }
            }

            /// Name of the tag, e.g. `SpendTx`
            pub const fn name(self) -> &'static str {
                match self {
                    $(Tag::$name => stringify!($name),)*
                }
            }
        }
    };
}

tags! {
    /// Account state
    Account = 10,
    /// Transaction with signatures
    SignedTx = 11,
    /// Coin transfer
    SpendTx = 12,
    /// Oracle state
    Oracle = 20,
    /// Oracle registration
    OracleRegisterTx = 22,
    /// Oracle query
    OracleQueryTx = 23,
    /// Oracle response
    OracleResponseTx = 24,
    /// Oracle TTL extension
    OracleExtendTx = 25,
    /// Name state
    Name = 30,
    /// Name claim
    NameClaimTx = 32,
    /// Name preclaim
    NamePreclaimTx = 33,
    /// Name update
    NameUpdateTx = 34,
    /// Name revoke
    NameRevokeTx = 35,
    /// Name transfer
    NameTransferTx = 36,
    /// Contract state
    Contract = 40,
    /// Contract call result
    ContractCall = 41,
    /// Contract creation
    ContractCreateTx = 42,
    /// Contract call
    ContractCallTx = 43,
    /// Channel creation
    ChannelCreateTx = 50,
    /// Channel deposit
    ChannelDepositTx = 51,
    /// Channel withdrawal
    ChannelWithdrawTx = 52,
    /// Mutual channel close
    ChannelCloseMutualTx = 53,
    /// Solo channel close
    ChannelCloseSoloTx = 54,
    /// Channel slash
    ChannelSlashTx = 55,
    /// Channel settle
    ChannelSettleTx = 56,
    /// Off-chain state
    ChannelOffChainTx = 57,
    /// Channel state
    Channel = 58,
    /// Channel snapshot
    ChannelSnapshotSoloTx = 59,
    /// Proof of inclusion
    TreesPoi = 60,
    /// State trees
    StateTrees = 62,
    /// Merkle Patricia tree
    Mtree = 63,
    /// Merkle Patricia tree value
    MtreeValue = 64,
    /// Compiled contract
    SophiaByteCode = 70,
    /// Generalized account attach
    GaAttachTx = 80,
    /// Generalized account meta transaction
    GaMetaTx = 81,
    /// Fee delegation
    PayingForTx = 82,
    /// Channel force progress
    ChannelForceProgressTx = 521,
    /// Off-chain transfer update
    ChannelOffChainUpdateTransfer = 570,
    /// Off-chain deposit update
    ChannelOffChainUpdateDeposit = 571,
    /// Off-chain withdrawal update
    ChannelOffChainUpdateWithdraw = 572,
    /// Off-chain contract creation update
    ChannelOffChainUpdateCreateContract = 573,
    /// Off-chain contract call update
    ChannelOffChainUpdateCallContract = 574,
    /// Channel client reconnect
    ChannelClientReconnectTx = 575,
    /// Contracts tree
    ContractsMtree = 621,
    /// Contract calls tree
    CallsMtree = 622,
    /// Channels tree
    ChannelsMtree = 623,
    /// Name service tree
    NameserviceMtree = 624,
    /// Oracles tree
    OraclesMtree = 625,
    /// Accounts tree
    AccountsMtree = 626,
    /// Authentication data of a meta transaction
    GaMetaTxAuthData = 810,
}

impl Tag {
    /// Numeric value
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Tag> for u16 {
    fn from(tag: Tag) -> Self {
        tag as u16
    }
}
