//! Transaction builder integration tests for ae-tx
//!
//! Fixtures are transactions accepted by a node. Each one is unpacked,
//! stripped of its fee and rebuilt, which must reproduce it byte for byte.

use ae_tx::helpers::{commitment_hash, oracle_query_id};
use ae_tx::{
    build_tx, build_tx_hash, unpack_tx, unpack_tx_rlp, BuildOptions, Denomination, Tag, TxError,
    TxParams, Value,
};

const SENDER: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";

const SPEND: &str = "tx_+F0MAaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ChAeEyuPHdt6BOY7f6lkeaVLvFJaUxp/G8DOSSEhkDBn+wiBvBbWdOyAAAhg9e1n8oAAABhHRlc3QLK3OW";
const NAME_PRECLAIM: &str = "tx_+E8hAaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ABoQOvDVCf43V7alNbsUvTarXaCf7rjtWX36YLS4+JTa4jn4YPHaUyOAAAxRZ6Sg==";
const NAME_CLAIM: &str = "tx_+FEgAqEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ABkXRlc3QxMjN0ZXN0LmNoYWluhw7wBz3KlPuJNjXJrcXeoAAAhg8m9WHIAABl9JBX";
const NAME_UPDATE: &str = "tx_+IQiAaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ABoQL1zlEz+3+D5h4MF9POub3zp5zJ2fj6VUWGMNOhCyMYPAHy8Y5hY2NvdW50X3B1YmtleaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ABhhAUch6gAADR52s+";
const NAME_REVOKE: &str = "tx_+E8jAaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ABoQL1zlEz+3+D5h4MF9POub3zp5zJ2fj6VUWGMNOhCyMYPIYPHaUyOAAA94BVgw==";
const NAME_TRANSFER: &str = "tx_+HEkAaEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7ABoQL1zlEz+3+D5h4MF9POub3zp5zJ2fj6VUWGMNOhCyMYPKEB4TK48d23oE5jt/qWR5pUu8UlpTGn8bwM5JISGQMGf7CGD7v4WsgAAL1d+NM=";
const CONTRACT_CREATE: &str = "tx_+LAqAaEB1c8IQA6YgiLybrSwLI+JB3RXRnIRpubZVe23B0nGozsBuGr4aEYDoKEijZbj/w2AeiWwAbldusME5pm3ZgPuomnZ3TbUbYgrwLg7nv5E1kQfADcANwAaDoI/AQM//oB4IJIANwEHBwEBAJgvAhFE1kQfEWluaXQRgHggkhlnZXRBcmeCLwCFNi4xLjAAgwcAA4ZHcyzkwAAAAACDGBf4hDuaygCHKxFE1kQfP+Jcll0=";
const CONTRACT_CALL: &str = "tx_+GMrAaEB1c8IQA6YgiLybrSwLI+JB3RXRnIRpubZVe23B0nGozsBoQU7e5ChtHAGM1Nh0MVEV74SbrYb1b5FQ3WBd7OBpwALyQOGpYvVcSgAAACDGBf4hDuaygCIKxGAeCCSGwQL3c3m";
const ORACLE_REGISTER: &str = "tx_+FAWAaEB1c8IQA6YgiLybrSwLI+JB3RXRnIRpubZVe23B0nGozsBjXsnY2l0eSc6IHN0cn2Meyd0bXAnOiBudW19gnUwAIIB9IYPN7jqmAAAAGsRIcw=";
const ORACLE_EXTEND: &str = "tx_8RkBoQTVzwhADpiCIvJutLAsj4kHdFdGchGm5tlV7bcHScajOwEAggH0hg6itfGYAADwE/X7";
const ORACLE_QUERY: &str = "tx_+GkXAaEB1c8IQA6YgiLybrSwLI+JB3RXRnIRpubZVe23B0nGozsBoQTVzwhADpiCIvJutLAsj4kHdFdGchGm5tlV7bcHScajO5J7J2NpdHknOiAnQmVybGluJ32CdTAAZABkhg+bJBmGAAAtn7nr";
const ORACLE_RESPONSE: &str = "tx_+F0YAaEE1c8IQA6YgiLybrSwLI+JB3RXRnIRpubZVe23B0nGozsBoClgM30zCmbxGvUfzRbIZXGzOT8KCzYAUMRdnxbBX2Q9jHsndG1wJzogMTAxfQBkhg9jQvwmAADfRUs7";
const CHANNEL_CREATE: &str = "tx_+IgyAqEBA36iFX3O+BMXMZJbffeT423KLpEuFsISUTsGu8Sb10eJBWvHXi1jEAAAoQGTnVZ1Jow5NGyBOg3NAf+ie3mV8qDj/wBwyKBHFNdhT4kFa8deLWMQAAAAAQCGECcSfcAAwMCgGAbROhx5lfoSkXsM5MQLw+EAWei3pcUGj/zWSO8RGkAKfIRASg==";

const FIXTURES: [(&str, Tag); 12] = [
    (SPEND, Tag::SpendTx),
    (NAME_PRECLAIM, Tag::NamePreclaimTx),
    (NAME_CLAIM, Tag::NameClaimTx),
    (NAME_UPDATE, Tag::NameUpdateTx),
    (NAME_REVOKE, Tag::NameRevokeTx),
    (NAME_TRANSFER, Tag::NameTransferTx),
    (CONTRACT_CREATE, Tag::ContractCreateTx),
    (CONTRACT_CALL, Tag::ContractCallTx),
    (ORACLE_REGISTER, Tag::OracleRegisterTx),
    (ORACLE_EXTEND, Tag::OracleExtendTx),
    (ORACLE_QUERY, Tag::OracleQueryTx),
    (ORACLE_RESPONSE, Tag::OracleResponseTx),
];

fn params_without_fee(encoded: &str, tag: Tag) -> TxParams {
    let mut params = unpack_tx(encoded, Some(tag)).unwrap().params;
    params.remove("fee");
    params
}

// ==================== Fixtures ====================

/// Every fixture is reproduced with a freshly calculated minimum fee
#[test]
fn test_fixtures_rebuild_with_min_fee() {
    for (encoded, tag) in FIXTURES {
        let params = params_without_fee(encoded, tag);
        let built = build_tx(&params, tag, &BuildOptions::default()).unwrap();
        assert_eq!(built.tx, encoded, "{tag}");
    }
}

/// Unpacked fixtures carry the expected values
#[test]
fn test_fixture_values() {
    let spend = unpack_tx(SPEND, Some(Tag::SpendTx)).unwrap();
    assert_eq!(spend.get("senderId"), Some(&Value::from(SENDER)));
    let payload = spend.params.get_str("payload").unwrap();
    assert_eq!(ae_encoding::decode(payload).unwrap(), b"test");
    assert_eq!(
        spend.params.get_int("amount"),
        Some(2_000_000_000_000_000_000u64.into())
    );

    let claim = unpack_tx(NAME_CLAIM, Some(Tag::NameClaimTx)).unwrap();
    assert_eq!(claim.version, 2);
    assert_eq!(claim.get("name"), Some(&Value::from("test123test.chain")));
    assert_eq!(
        claim.params.get_int("nameFee"),
        Some("1000000000000000000000".parse().unwrap())
    );
    assert_eq!(claim.params.get_int("nameSalt"), Some(4_204_563_566_073_083u64.into()));
}

/// Derived ids match the ones inside the fixtures
#[test]
fn test_fixture_derived_ids() {
    let preclaim = unpack_tx(NAME_PRECLAIM, Some(Tag::NamePreclaimTx)).unwrap();
    assert_eq!(
        preclaim.params.get_str("commitmentId"),
        Some(commitment_hash("test123test.chain", 4_204_563_566_073_083).unwrap().as_str())
    );

    let response = unpack_tx(ORACLE_RESPONSE, Some(Tag::OracleResponseTx)).unwrap();
    let oracle_id = response.params.get_str("oracleId").unwrap();
    let caller = ae_encoding::encode(
        &ae_encoding::decode(oracle_id).unwrap(),
        ae_encoding::Encoding::AccountAddress,
    )
    .unwrap();
    let query_id = oracle_query_id(&caller, 1, oracle_id).unwrap();
    assert_eq!(response.params.get_str("queryId"), Some(query_id.as_str()));
}

/// An amount given in AE is scaled to aettos
#[test]
fn test_spend_in_ae() {
    let mut params = params_without_fee(SPEND, Tag::SpendTx);
    params.insert("amount", 2u64);
    let opts = BuildOptions::default().with_denomination(Denomination::Ae);
    let built = build_tx(&params, Tag::SpendTx, &opts).unwrap();
    assert_eq!(built.tx, SPEND);
}

/// A channel create transaction survives unpack and rebuild
#[test]
fn test_channel_create_roundtrip() {
    let unpacked = unpack_tx(CHANNEL_CREATE, Some(Tag::ChannelCreateTx)).unwrap();
    assert_eq!(unpacked.version, 2);
    let built = build_tx(&unpacked.params, Tag::ChannelCreateTx, &BuildOptions::default()).unwrap();
    assert_eq!(built.tx, CHANNEL_CREATE);
    assert_eq!(built.tx_object, unpacked);
}

/// The spend from the protocol documentation
#[test]
fn test_documented_spend() {
    let account = "ak_i9svRuk9SJfAponRnCYVnVWN9HVLdBEd8ZdGREJMaUiTn4S4D";
    let params = TxParams::new()
        .with("senderId", account)
        .with("recipientId", account)
        .with("amount", 0u64)
        .with("ttl", 0u64)
        .with("nonce", 0u64);
    let built = build_tx(&params, Tag::SpendTx, &BuildOptions::default()).unwrap();
    assert_eq!(
        built.tx,
        "tx_+FEMAaEBXXFtZp9YqbY4KdW8Nolf9Hjp0VZcNWnQOKjgCb8Br9mhAV1xbWafWKm2OCnVvDaJX/R46dFWXDVp0Dio4Am/Aa/ZAIYPJvVhyAAAAIBeys6T"
    );
}

/// Transaction hash of a spend
#[test]
fn test_tx_hash() {
    assert_eq!(
        build_tx_hash(SPEND).unwrap(),
        "th_fyAYUVZhZEyzWer3Fp4tYsGrkgdB8Pmu5ZUjLDGCNqyXnRdnS"
    );
}

// ==================== Nested transactions ====================

/// A signed transaction nests the encoded one and unpacks it again
#[test]
fn test_signed_tx_nesting() {
    let signature = vec![7u8; 64];
    let params = TxParams::new()
        .with("signatures", vec![Value::Bytes(signature.clone())])
        .with("encodedTx", SPEND);
    let built = build_tx(&params, Tag::SignedTx, &BuildOptions::default()).unwrap();

    let signed = unpack_tx(&built.tx, Some(Tag::SignedTx)).unwrap();
    assert_eq!(
        signed.get("signatures"),
        Some(&Value::List(vec![Value::Bytes(signature)]))
    );
    let inner = signed.get("encodedTx").and_then(Value::as_tx).unwrap();
    assert_eq!(inner.tag, Tag::SpendTx);
    assert_eq!(*inner, unpack_tx(SPEND, None).unwrap());
}

/// Paying-for fees only charge the outer envelope
#[test]
fn test_paying_for_fee_excludes_inner_tx() {
    let signed = build_tx(
        &TxParams::new()
            .with("signatures", vec![Value::Bytes(vec![1; 64])])
            .with("encodedTx", SPEND),
        Tag::SignedTx,
        &BuildOptions::default(),
    )
    .unwrap();
    let params = TxParams::new()
        .with("payerId", SENDER)
        .with("nonce", 1u64)
        .with("tx", signed.tx.as_str());
    let built = build_tx(&params, Tag::PayingForTx, &BuildOptions::default()).unwrap();

    let inner_size = unpack_tx(SPEND, None).unwrap().rlp.len();
    let expected_gas = 3_000 + (built.rlp.len() - inner_size) as u64 * 20;
    assert_eq!(
        built.tx_object.params.get_int("fee"),
        Some((expected_gas * 1_000_000_000).into())
    );
}

/// Hand-encoded SignedTx around the spend fixture with the given signature list items
fn signed_spend_rlp(signature_items: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x0b, 0x01, 0xf8, signature_items.len() as u8];
    payload.extend_from_slice(signature_items);
    payload.extend(ae_rlp::RlpItem::Bytes(ae_encoding::decode(SPEND).unwrap()).encode());
    let mut rlp = vec![0xf8, payload.len() as u8];
    rlp.extend(payload);
    rlp
}

/// A signature list with a truncated trailing item is rejected as a whole
#[test]
fn test_signed_tx_truncated_signature_item() {
    let mut signature = vec![0xb8, 0x40];
    signature.extend([7u8; 64]);

    let signed = unpack_tx_rlp(&signed_spend_rlp(&signature), Some(Tag::SignedTx)).unwrap();
    assert_eq!(
        signed.get("signatures"),
        Some(&Value::List(vec![Value::Bytes(vec![7; 64])]))
    );

    let mut corrupted = signature.clone();
    corrupted.extend([0x82, 0x05]);
    let err = unpack_tx_rlp(&signed_spend_rlp(&corrupted), Some(Tag::SignedTx)).unwrap_err();
    assert!(matches!(err, TxError::Rlp(_)));
}

// ==================== Errors ====================

/// All invalid fields are reported at once
#[test]
fn test_validation_is_aggregated() {
    let params = TxParams::new()
        .with("senderId", "ok_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688")
        .with("amount", "abc")
        .with("nonce", -3i64);
    let err = build_tx(&params, Tag::SpendTx, &BuildOptions::default()).unwrap_err();
    let fields: Vec<_> = err
        .field_errors()
        .iter()
        .map(|e| (e.field.as_str(), e.message.as_str()))
        .collect();
    assert_eq!(
        fields,
        [
            (
                "senderId",
                "'ok_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688' prefix doesn't match expected prefix 'ak'"
            ),
            ("recipientId", "Field is required"),
            ("amount", "abc is not of type Number or BigNumber"),
            ("ttl", "Field is required"),
            ("nonce", "-3 must be >= 0"),
        ]
    );
}

/// Unpacking with the wrong expected tag fails before decoding fields
#[test]
fn test_expected_tag_mismatch() {
    let err = unpack_tx(SPEND, Some(Tag::ContractCallTx)).unwrap_err();
    assert!(matches!(err, TxError::Decode(_)));
    assert_eq!(err.to_string(), "Expected ContractCallTx tag, got SpendTx instead");
}

/// A corrupted checksum is rejected
#[test]
fn test_corrupted_transaction() {
    let mut corrupted = SPEND.to_string();
    corrupted.replace_range(10..11, if &SPEND[10..11] == "A" { "B" } else { "A" });
    assert!(matches!(
        unpack_tx(&corrupted, None).unwrap_err(),
        TxError::Encoding(_)
    ));
}
