//! # Operations
//!
//! An operation wraps exactly one fact with a network identifier and an
//! ordered, signer-deduplicated set of signatures. The network identifier
//! is domain-separation salt: the same fact signed for another network
//! produces incompatible signatures.
//!
//! Lifecycle: created unsigned; signatures accumulate through explicit
//! [`Operation::sign`] calls (re-signing with the same key replaces rather
//! than appends); sendable once at least one signature is present. No
//! field other than the sign set ever mutates.

use std::fmt;

use serde_json::{json, Value};
use tracing::debug;

use crate::common::{NodeAddress, TimeStamp};
use crate::crypto;
use crate::error::{ensure, ErrorCode, Result};
use crate::fact::Fact;
use crate::hint::{self, Hint};
use crate::key::{Key, Keypair};

// ---------------------------------------------------------------------------
// NetworkId
// ---------------------------------------------------------------------------

/// The chain's network identifier, e.g. `"mitum"` or `"testnet"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkId(String);

impl NetworkId {
    /// Validates and wraps a network identifier.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        ensure(
            !s.is_empty(),
            ErrorCode::InvalidNetworkId,
            "network id must not be empty",
        )?;
        Ok(Self(s))
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical bytes: the identifier's UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone().into_bytes()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// One signature over an operation's fact.
///
/// The signing timestamp is folded into the signed content, so each record
/// binds to its specific signing moment. Node signs additionally carry and
/// bind the signing node's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sign {
    signer: Key,
    signature: Vec<u8>,
    signed_at: TimeStamp,
    node: Option<NodeAddress>,
}

impl Sign {
    /// The signer's public key.
    pub fn signer(&self) -> &Key {
        &self.signer
    }

    /// The raw signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// When the signature was made.
    pub fn signed_at(&self) -> TimeStamp {
        self.signed_at
    }

    /// The signing node, for node signs.
    pub fn node(&self) -> Option<&NodeAddress> {
        self.node.as_ref()
    }

    /// Canonical bytes: signer, signature, signing timestamp.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.signer.to_bytes();
        buf.extend_from_slice(&self.signature);
        buf.extend_from_slice(&self.signed_at.to_bytes());
        buf
    }

    /// The tagged JSON projection; the signature renders base58.
    pub fn to_hinted_json(&self) -> Value {
        let mut v = json!({
            "_hint": hint::FACT_SIGN.to_string(),
            "signer": self.signer.as_str(),
            "signature": bs58::encode(&self.signature).into_string(),
            "signed_at": self.signed_at.to_string(),
        });
        if let (Some(map), Some(node)) = (v.as_object_mut(), &self.node) {
            map.insert("node".to_owned(), Value::String(node.as_str().to_owned()));
        }
        v
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// A fact wrapped for submission: network id, signatures, wire projection.
#[derive(Debug, Clone)]
pub struct Operation<F: Fact> {
    hint: Hint,
    network_id: NetworkId,
    fact: F,
    signs: Vec<Sign>,
}

impl<F: Fact> Operation<F> {
    /// Wraps a fact for the given network. The envelope hint comes from
    /// the fact itself and is fixed here once.
    pub fn new(network_id: NetworkId, fact: F) -> Self {
        let hint = fact.operation_hint();
        Self {
            hint,
            network_id,
            fact,
            signs: Vec::new(),
        }
    }

    /// The envelope hint.
    pub fn hint(&self) -> Hint {
        self.hint
    }

    /// The network this operation is bound to.
    pub fn network_id(&self) -> &NetworkId {
        &self.network_id
    }

    /// The wrapped fact.
    pub fn fact(&self) -> &F {
        &self.fact
    }

    /// The accumulated signatures, in sign order.
    pub fn signs(&self) -> &[Sign] {
        &self.signs
    }

    /// True once at least one signature is present — the "sendable" state.
    pub fn is_signed(&self) -> bool {
        !self.signs.is_empty()
    }

    /// The operation hash: SHA-256 over network-id bytes and the fact-hash
    /// digest, rendered base58. Signatures are excluded on purpose, so the
    /// hash is stable while the sign set grows.
    pub fn hash(&self) -> String {
        crypto::to_base58(&self.hash_digest())
    }

    fn hash_digest(&self) -> [u8; 32] {
        let network_id = self.network_id.to_bytes();
        crypto::sha256_multi(&[network_id.as_slice(), self.fact.hash().as_bytes().as_slice()])
    }

    /// Signs the fact with an account key and appends (or, for a repeat
    /// signer, replaces) the signature record.
    pub fn sign(&mut self, keypair: &Keypair) {
        let signed_at = TimeStamp::now();
        let content = self.sign_content(None, signed_at);
        let signature = keypair.sign(&content);
        self.push_sign(Sign {
            signer: keypair.public_key(),
            signature,
            signed_at,
            node: None,
        });
    }

    /// Signs the fact as a consensus node. The node address becomes part
    /// of both the signed content and the signature record. Whether the
    /// key is actually an authorized node key is enforced by the chain,
    /// not here — this only shapes the byte layout.
    pub fn sign_with_node(&mut self, node: NodeAddress, keypair: &Keypair) {
        let signed_at = TimeStamp::now();
        let content = self.sign_content(Some(&node), signed_at);
        let signature = keypair.sign(&content);
        self.push_sign(Sign {
            signer: keypair.public_key(),
            signature,
            signed_at,
            node: Some(node),
        });
    }

    /// The exact byte layout a signature covers:
    /// network-id ∥ (node address)? ∥ fact-hash digest ∥ signed-at.
    pub fn sign_content(&self, node: Option<&NodeAddress>, signed_at: TimeStamp) -> Vec<u8> {
        let mut buf = self.network_id.to_bytes();
        if let Some(node) = node {
            buf.extend_from_slice(&node.to_bytes());
        }
        buf.extend_from_slice(self.fact.hash().as_bytes());
        buf.extend_from_slice(&signed_at.to_bytes());
        buf
    }

    fn push_sign(&mut self, sign: Sign) {
        let existing = self
            .signs
            .iter()
            .position(|s| s.signer == sign.signer && s.node == sign.node);
        match existing {
            Some(idx) => {
                debug!(signer = %sign.signer, fact = %self.fact.hash(), "replacing existing signature");
                self.signs[idx] = sign;
            }
            None => {
                debug!(signer = %sign.signer, fact = %self.fact.hash(), "operation signed");
                self.signs.push(sign);
            }
        }
    }

    /// The wire form: `{_hint, fact, hash, signs}`. Field presence and
    /// nesting here are the bit-exact contract the node's decoder consumes.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": self.hint.to_string(),
            "fact": self.fact.to_hinted_json(),
            "hash": self.hash(),
            "signs": self.signs.iter().map(Sign::to_hinted_json).collect::<Vec<_>>(),
        })
    }

    /// UTF-8 byte length of the wire form, as checked by the size guard.
    pub fn serialized_len(&self) -> usize {
        self.to_hinted_json().to_string().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Address, Token};
    use crate::crypto::sha256;
    use crate::fact::currency::{TransferFact, TransferItem};
    use crate::fact::Fact;

    fn addr(label: &str) -> Address {
        Address::from_checksum(&sha256(label.as_bytes()))
    }

    fn sample_operation() -> Operation<TransferFact> {
        let fact = TransferFact::new(
            Token::new("op-test-token").unwrap(),
            addr("sender"),
            vec![TransferItem::new(
                addr("receiver"),
                vec![crate::common::Amount::from_parts("100", "PEN").unwrap()],
            )
            .unwrap()],
        )
        .unwrap();
        Operation::new(NetworkId::new("mitum").unwrap(), fact)
    }

    #[test]
    fn network_id_rejects_empty() {
        assert_eq!(
            NetworkId::new("").unwrap_err().code,
            ErrorCode::InvalidNetworkId
        );
    }

    #[test]
    fn fresh_operations_are_unsigned() {
        let op = sample_operation();
        assert!(!op.is_signed());
        assert!(op.signs().is_empty());
    }

    #[test]
    fn signing_twice_with_one_key_replaces() {
        let mut op = sample_operation();
        let kp = Keypair::from_seed(&[1; 32]);
        op.sign(&kp);
        op.sign(&kp);
        assert_eq!(op.signs().len(), 1);
        assert_eq!(op.signs()[0].signer(), &kp.public_key());
    }

    #[test]
    fn distinct_keys_accumulate_in_sign_order() {
        let mut op = sample_operation();
        let first = Keypair::from_seed(&[1; 32]);
        let second = Keypair::from_seed(&[2; 32]);
        op.sign(&first);
        op.sign(&second);
        assert_eq!(op.signs().len(), 2);
        assert_eq!(op.signs()[0].signer(), &first.public_key());
        assert_eq!(op.signs()[1].signer(), &second.public_key());
    }

    #[test]
    fn signature_verifies_over_declared_content() {
        let mut op = sample_operation();
        let kp = Keypair::from_seed(&[3; 32]);
        op.sign(&kp);
        let sign = &op.signs()[0];
        let content = op.sign_content(None, sign.signed_at());
        assert!(kp.verify(&content, sign.signature()));
    }

    #[test]
    fn node_sign_binds_the_node_address() {
        let mut op = sample_operation();
        let kp = Keypair::from_seed(&[4; 32]);
        let node = NodeAddress::new("no0sas").unwrap();
        op.sign_with_node(node.clone(), &kp);

        let sign = &op.signs()[0];
        assert_eq!(sign.node(), Some(&node));

        let with_node = op.sign_content(Some(&node), sign.signed_at());
        let without_node = op.sign_content(None, sign.signed_at());
        assert!(kp.verify(&with_node, sign.signature()));
        assert!(!kp.verify(&without_node, sign.signature()));
    }

    #[test]
    fn account_and_node_signs_by_one_key_coexist() {
        let mut op = sample_operation();
        let kp = Keypair::from_seed(&[5; 32]);
        op.sign(&kp);
        op.sign_with_node(NodeAddress::new("no0sas").unwrap(), &kp);
        assert_eq!(op.signs().len(), 2);
    }

    #[test]
    fn operation_hash_ignores_signing() {
        let mut op = sample_operation();
        let before = op.hash();
        op.sign(&Keypair::from_seed(&[6; 32]));
        assert_eq!(op.hash(), before);
    }

    #[test]
    fn operation_hash_depends_on_network_id() {
        let fact = sample_operation().fact().clone();
        let mainnet = Operation::new(NetworkId::new("mitum").unwrap(), fact.clone());
        let testnet = Operation::new(NetworkId::new("testnet").unwrap(), fact);
        assert_ne!(mainnet.hash(), testnet.hash());
    }

    #[test]
    fn wire_json_shape() {
        let mut op = sample_operation();
        let kp = Keypair::from_seed(&[7; 32]);
        op.sign(&kp);

        let v = op.to_hinted_json();
        assert_eq!(v["_hint"], "mitum-currency-transfer-operation-v0.0.1");
        assert_eq!(v["hash"], op.hash());
        assert_eq!(v["fact"]["hash"], op.fact().hash().to_string());
        let sign = &v["signs"][0];
        assert_eq!(sign["_hint"], "base-fact-sign-v0.0.1");
        assert_eq!(sign["signer"], kp.public_key().as_str());
        assert!(sign.get("node").is_none());
        // The signature is base58 of 64 bytes.
        let sig = bs58::decode(sign["signature"].as_str().unwrap())
            .into_vec()
            .unwrap();
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn node_sign_appears_in_wire_json() {
        let mut op = sample_operation();
        op.sign_with_node(
            NodeAddress::new("no0sas").unwrap(),
            &Keypair::from_seed(&[8; 32]),
        );
        let v = op.to_hinted_json();
        assert_eq!(v["signs"][0]["node"], "no0sas");
    }

    #[test]
    fn sign_bytes_layout_is_signer_signature_timestamp() {
        let mut op = sample_operation();
        let kp = Keypair::from_seed(&[9; 32]);
        op.sign(&kp);

        let sign = &op.signs()[0];
        let bytes = sign.to_bytes();
        let mut expected = kp.public_key().to_bytes();
        expected.extend_from_slice(sign.signature());
        expected.extend_from_slice(&sign.signed_at().to_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn serialized_len_matches_rendering() {
        let op = sample_operation();
        assert_eq!(
            op.serialized_len(),
            op.to_hinted_json().to_string().len()
        );
    }
}
