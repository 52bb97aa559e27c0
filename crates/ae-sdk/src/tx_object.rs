//! Transaction object
//!
//! [`TxObject`] keeps the parameters a transaction was built from next to
//! its encoded form, so single fields can be changed and the fee follows.
//! Signatures wrap the transaction into a `SignedTx` envelope.

use std::fmt;

use ae_encoding::{decode, encode, Encoding};
use ae_tx::schema::serialization_schema;
use ae_tx::{
    build_tx, build_tx_hash_rlp, unpack_tx_rlp, BigInt, BigUint, BuildOptions, BuiltTx, Tag,
    TxParams, UnpackedTx, Value,
};

use crate::{SdkConfig, SdkError};

/// Length of an ed25519 signature
pub const SIGNATURE_LEN: usize = 64;

/// Encoded transaction and its RLP bytes
#[derive(Debug, Clone, PartialEq, Eq)]
struct Envelope {
    tx: String,
    rlp: Vec<u8>,
}

/// A transaction with its build parameters and signatures
#[derive(Debug, Clone, PartialEq)]
pub struct TxObject {
    params: TxParams,
    options: BuildOptions,
    tx: UnpackedTx,
    unsigned: Envelope,
    signatures: Vec<Vec<u8>>,
    signed: Option<Envelope>,
}

impl TxObject {
    /// Build a transaction, computing the fee when it is absent
    pub fn build(tag: Tag, params: TxParams) -> Result<Self, SdkError> {
        Self::build_with_options(tag, params, BuildOptions::default())
    }

    /// Build a transaction with explicit builder options
    pub fn build_with_options(
        tag: Tag,
        params: TxParams,
        options: BuildOptions,
    ) -> Result<Self, SdkError> {
        let built = build_tx(&params, tag, &options)?;
        Ok(Self::from_built(params, options, built))
    }

    /// Build a transaction with the settings of `config`
    ///
    /// A missing `ttl` is taken from `config.default_ttl`.
    pub fn build_with_config(
        tag: Tag,
        mut params: TxParams,
        config: &SdkConfig,
    ) -> Result<Self, SdkError> {
        let options = config.build_options()?;
        let schema = serialization_schema(tag, options.version)?;
        if schema.has_field("ttl") && !params.contains_key("ttl") {
            params.insert("ttl", config.default_ttl);
        }
        Self::build_with_options(tag, params, options)
    }

    /// Parse an encoded transaction, signed or not
    pub fn from_string(encoded: &str) -> Result<Self, SdkError> {
        Self::from_rlp(&decode(encoded)?)
    }

    /// Parse the RLP bytes of a transaction, signed or not
    pub fn from_rlp(rlp: &[u8]) -> Result<Self, SdkError> {
        let unpacked = unpack_tx_rlp(rlp, None)?;
        if unpacked.tag != Tag::SignedTx {
            return Self::from_unpacked(unpacked);
        }

        let signatures = unpacked
            .get("signatures")
            .and_then(Value::as_list)
            .ok_or_else(|| SdkError::MissingField("signatures".to_string()))?
            .iter()
            .map(|signature| {
                signature
                    .as_bytes()
                    .map(<[u8]>::to_vec)
                    .ok_or_else(|| SdkError::InvalidSignature(format!("expected bytes, got {signature}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let inner = unpacked
            .get("encodedTx")
            .and_then(Value::as_tx)
            .cloned()
            .ok_or_else(|| SdkError::MissingField("encodedTx".to_string()))?;

        let mut object = Self::from_unpacked(inner)?;
        tracing::debug!(tag = %object.tag(), signatures = signatures.len(), "unwrapped signed transaction");
        object.signatures = signatures;
        object.signed = Some(Envelope {
            tx: encode(rlp, Encoding::Transaction)?,
            rlp: rlp.to_vec(),
        });
        Ok(object)
    }

    fn from_unpacked(tx: UnpackedTx) -> Result<Self, SdkError> {
        let unsigned = Envelope {
            tx: encode(&tx.rlp, Encoding::Transaction)?,
            rlp: tx.rlp.clone(),
        };
        Ok(Self {
            params: tx.params.clone(),
            options: BuildOptions::default().with_version(tx.version),
            tx,
            unsigned,
            signatures: Vec::new(),
            signed: None,
        })
    }

    fn from_built(mut params: TxParams, options: BuildOptions, built: BuiltTx) -> Self {
        if let Some(fee) = built.tx_object.get("fee") {
            params.insert("fee", fee.clone());
        }
        Self {
            params,
            options,
            tx: built.tx_object,
            unsigned: Envelope {
                tx: built.tx,
                rlp: built.rlp,
            },
            signatures: Vec::new(),
            signed: None,
        }
    }

    /// Transaction type
    pub fn tag(&self) -> Tag {
        self.tx.tag
    }

    /// Parameters the transaction is rebuilt from, fee included
    pub fn params(&self) -> &TxParams {
        &self.params
    }

    /// The unsigned transaction as decoded from its RLP
    pub fn tx_object(&self) -> &UnpackedTx {
        &self.tx
    }

    /// Fee of the unsigned transaction
    pub fn fee(&self) -> Option<BigInt> {
        self.tx.params.get_int("fee")
    }

    /// Encoded transaction, the `SignedTx` envelope once signed
    pub fn encoded(&self) -> &str {
        &self.signed.as_ref().unwrap_or(&self.unsigned).tx
    }

    /// RLP bytes of [`TxObject::encoded`]
    pub fn rlp(&self) -> &[u8] {
        &self.signed.as_ref().unwrap_or(&self.unsigned).rlp
    }

    /// Encoded transaction without signatures
    pub fn unsigned_encoded(&self) -> &str {
        &self.unsigned.tx
    }

    /// Whether any signature is attached
    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// Attached signatures
    pub fn signatures(&self) -> Result<&[Vec<u8>], SdkError> {
        if self.signatures.is_empty() {
            return Err(SdkError::NotSigned);
        }
        Ok(&self.signatures)
    }

    /// Change a parameter and rebuild
    ///
    /// The fee is recalculated unless `fee` itself is set. Signatures are
    /// dropped since they no longer match.
    pub fn set_prop(&mut self, key: &str, value: impl Into<Value>) -> Result<(), SdkError> {
        let mut params = self.params.clone();
        params.insert(key, value);
        if key != "fee" {
            params.remove("fee");
        }
        let built = build_tx(&params, self.tag(), &self.options)?;
        if self.is_signed() {
            tracing::debug!(tag = %self.tag(), key, "dropping signatures of modified transaction");
        }
        *self = Self::from_built(params, self.options.clone(), built);
        Ok(())
    }

    /// Attach a signature and wrap the transaction into a `SignedTx`
    pub fn add_signature(&mut self, signature: impl AsRef<[u8]>) -> Result<(), SdkError> {
        let signature = signature.as_ref();
        if signature.len() != SIGNATURE_LEN {
            return Err(SdkError::InvalidSignature(format!(
                "should be {SIGNATURE_LEN} bytes, got {} instead",
                signature.len()
            )));
        }
        let mut signatures = self.signatures.clone();
        signatures.push(signature.to_vec());

        let params = TxParams::new()
            .with(
                "signatures",
                signatures.iter().cloned().map(Value::Bytes).collect::<Vec<_>>(),
            )
            .with("encodedTx", self.tx.clone());
        let built = build_tx(&params, Tag::SignedTx, &BuildOptions::default())?;
        self.signatures = signatures;
        self.signed = Some(Envelope {
            tx: built.tx,
            rlp: built.rlp,
        });
        Ok(())
    }

    /// Minimum fee of the transaction with its current parameters
    pub fn calculate_min_fee(&self) -> Result<BigUint, SdkError> {
        let tag = self.tag();
        let mut params = self.params.clone();
        let fee = ae_tx::calculate_min_fee(
            tag,
            |fee| {
                params.insert("fee", fee.clone());
                Ok(build_tx(&params, tag, &self.options)?.tx_object)
            },
            &self.options.gas_price,
            self.options.fee_max_iterations,
        )?;
        Ok(fee)
    }

    /// `th_` hash of [`TxObject::encoded`]
    pub fn hash(&self) -> Result<String, SdkError> {
        Ok(build_tx_hash_rlp(self.rlp())?)
    }
}

impl fmt::Display for TxObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoded())
    }
}
