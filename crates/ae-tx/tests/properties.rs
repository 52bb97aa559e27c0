//! Property tests for the builder and fee calculator

use ae_tx::{build_tx, unpack_tx, BigInt, BuildOptions, Tag, TxError, TxParams, Value};
use proptest::prelude::*;

const ACCOUNT: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";

fn spend(payload: &str, amount: u64, nonce: u64) -> TxParams {
    TxParams::new()
        .with("senderId", ACCOUNT)
        .with("recipientId", ACCOUNT)
        .with("amount", amount)
        .with("ttl", 0u64)
        .with("nonce", nonce)
        .with("payload", payload)
}

fn min_fee(params: &TxParams) -> BigInt {
    build_tx(params, Tag::SpendTx, &BuildOptions::default())
        .unwrap()
        .tx_object
        .params
        .get_int("fee")
        .unwrap()
}

proptest! {
    /// A longer payload never lowers the minimum fee
    #[test]
    fn prop_fee_monotonic_in_payload(base in "[a-z]{0,40}", extra in "[a-z]{1,40}") {
        let short = min_fee(&spend(&base, 1, 1));
        let long = min_fee(&spend(&format!("{base}{extra}"), 1, 1));
        prop_assert!(long >= short);
    }

    /// Built spends unpack to the values they were built from
    #[test]
    fn prop_spend_roundtrip(amount in any::<u64>(), nonce in any::<u64>(), payload in "[a-z0-9 ]{0,64}") {
        let built = build_tx(&spend(&payload, amount, nonce), Tag::SpendTx, &BuildOptions::default()).unwrap();
        let unpacked = unpack_tx(&built.tx, Some(Tag::SpendTx)).unwrap();
        prop_assert_eq!(unpacked.params.get_int("amount"), Some(BigInt::from(amount)));
        prop_assert_eq!(unpacked.params.get_int("nonce"), Some(BigInt::from(nonce)));
        prop_assert_eq!(unpacked.get("recipientId"), Some(&Value::from(ACCOUNT)));
        prop_assert_eq!(&unpacked, &built.tx_object);
    }

    /// Negative integers never pass validation
    #[test]
    fn prop_negative_amount_rejected(amount in i64::MIN..0) {
        let params = spend("", 0, 0).with("amount", amount);
        let err = build_tx(&params, Tag::SpendTx, &BuildOptions::default()).unwrap_err();
        prop_assert!(matches!(err, TxError::Validation(_)));
        prop_assert_eq!(err.field_errors()[0].field.as_str(), "amount");
    }
}
