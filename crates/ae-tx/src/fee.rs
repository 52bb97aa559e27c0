//! Minimum fee calculation
//!
//! The fee of a transaction depends on its serialized size, which in turn
//! depends on the fee. [`calculate_min_fee`] rebuilds the transaction until
//! the estimate stops changing.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Tag, TxError, UnpackedTx, Value};

/// Gas charged for any transaction before size is taken into account
pub const BASE_GAS: u64 = 15_000;

/// Gas charged per byte of the serialized transaction
pub const GAS_PER_BYTE: u64 = 20;

/// Expected key block interval, in minutes
pub const KEY_BLOCK_INTERVAL: u64 = 3;

/// Fee used by callers that do not calculate one
pub const DEFAULT_FEE: u64 = 20_000;

/// Iterations of the fee fixed point before giving up
pub const DEFAULT_FEE_MAX_ITERATIONS: usize = 32;

const ORACLE_TTL_GAS: u64 = 32_000;

const KEY_BLOCKS_PER_YEAR: u64 = 60 * 24 * 365 / KEY_BLOCK_INTERVAL;

/// Base gas of a transaction type
pub fn base_gas(tag: Tag) -> BigUint {
    let gas = match tag {
        Tag::ChannelForceProgressTx => 30 * BASE_GAS,
        Tag::ChannelOffChainTx
        | Tag::ChannelOffChainUpdateTransfer
        | Tag::ChannelOffChainUpdateDeposit
        | Tag::ChannelOffChainUpdateWithdraw
        | Tag::ChannelOffChainUpdateCreateContract
        | Tag::ChannelOffChainUpdateCallContract => 0,
        Tag::ContractCreateTx | Tag::GaAttachTx | Tag::GaMetaTx => 5 * BASE_GAS,
        Tag::ContractCallTx => 12 * BASE_GAS,
        Tag::PayingForTx => BASE_GAS / 5,
        _ => BASE_GAS,
    };
    BigUint::from(gas)
}

/// Size-dependent gas of a transaction type
///
/// `relative_ttl` only matters for oracle transactions, `inner_size` only
/// for transactions wrapping another signed transaction.
pub fn other_gas(tag: Tag, size: usize, relative_ttl: &BigUint, inner_size: usize) -> BigUint {
    match tag {
        Tag::OracleRegisterTx
        | Tag::OracleExtendTx
        | Tag::OracleQueryTx
        | Tag::OracleResponseTx => {
            let ttl_gas = relative_ttl * ORACLE_TTL_GAS;
            let ttl_gas = (ttl_gas + (KEY_BLOCKS_PER_YEAR - 1)) / KEY_BLOCKS_PER_YEAR;
            BigUint::from(size) * GAS_PER_BYTE + ttl_gas
        }
        Tag::GaMetaTx | Tag::PayingForTx => {
            BigUint::from(size.saturating_sub(inner_size)) * GAS_PER_BYTE
        }
        _ => BigUint::from(size) * GAS_PER_BYTE,
    }
}

fn oracle_relative_ttl(tx: &UnpackedTx) -> BigUint {
    let key = match tx.tag {
        Tag::OracleRegisterTx | Tag::OracleExtendTx => "oracleTtlValue",
        Tag::OracleQueryTx => "queryTtlValue",
        Tag::OracleResponseTx => "responseTtlValue",
        _ => return BigUint::from(1u32),
    };
    tx.get(key)
        .and_then(Value::as_uint)
        .unwrap_or_else(|| BigUint::from(1u32))
}

fn inner_tx_size(tx: &UnpackedTx) -> usize {
    if !matches!(tx.tag, Tag::GaMetaTx | Tag::PayingForTx) {
        return 0;
    }
    let Some(inner) = tx.get("tx").and_then(Value::as_tx) else {
        return 0;
    };
    inner
        .get("encodedTx")
        .and_then(Value::as_tx)
        .map_or(inner.rlp.len(), |encoded| encoded.rlp.len())
}

/// Gas used by a built transaction
pub fn build_gas(tx: &UnpackedTx) -> BigUint {
    base_gas(tx.tag)
        + other_gas(
            tx.tag,
            tx.rlp.len(),
            &oracle_relative_ttl(tx),
            inner_tx_size(tx),
        )
}

/// Fee of a built transaction at `gas_price`
pub fn build_fee(tx: &UnpackedTx, gas_price: &BigUint) -> BigUint {
    build_gas(tx) * gas_price
}

/// Minimum fee of a transaction
///
/// `build` serializes the transaction with the given fee. Starting from a
/// zero fee, the transaction is rebuilt with the last estimate until the
/// estimate is stable, at most `max_iterations` times.
pub fn calculate_min_fee<F>(
    tag: Tag,
    mut build: F,
    gas_price: &BigUint,
    max_iterations: usize,
) -> Result<BigUint, TxError>
where
    F: FnMut(&BigUint) -> Result<UnpackedTx, TxError>,
{
    let mut fee = BigUint::zero();
    for iteration in 1..=max_iterations {
        let built = build(&fee)?;
        let next = build_fee(&built, gas_price);
        tracing::trace!(%tag, iteration, size = built.rlp.len(), fee = %next, "fee estimate");
        if next == fee {
            tracing::debug!(%tag, iteration, fee = %fee, "fee converged");
            return Ok(fee);
        }
        fee = next;
    }
    tracing::warn!(%tag, max_iterations, last = %fee, "fee did not converge");
    Err(TxError::FeeNotConverged {
        iterations: max_iterations,
        last: fee,
    })
}
