//! # Facts
//!
//! A fact is the semantic content of one operation: "transfer 10 PEN from
//! A to B", "register currency X". Every fact deterministically serializes
//! to canonical bytes — hint tag, then token, then its fields in declared
//! order — and is content-addressed by the SHA-256 of those bytes. The
//! hash is computed inside the constructor: a fact either comes out whole,
//! hashed, and immutable, or construction fails before any hash exists.
//!
//! Two origin variants share the contract:
//!
//! - **account facts** carry a random-nonce token and a `sender` address —
//!   user-initiated intents, authorized by the sender's key set.
//! - **node facts** carry a UTC-timestamp token and no sender —
//!   operations only a consensus node may originate; authorization is
//!   structural (a node signature, enforced by the chain).

pub mod currency;

use std::fmt;

use serde_json::{json, Value};

use crate::common::{Address, Token};
use crate::config;
use crate::crypto;
use crate::error::{ensure, Error, ErrorCode, Result};
use crate::hint::{Hint, OperationKind};

// ---------------------------------------------------------------------------
// FactHash
// ---------------------------------------------------------------------------

/// The content-addressed identifier of a fact.
///
/// Wraps the 32-byte SHA-256 digest of the fact's canonical bytes;
/// rendered base58 on the wire (43–44 characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactHash([u8; 32]);

impl FactHash {
    /// Hashes a fact's canonical bytes.
    pub fn digest(bytes: &[u8]) -> Self {
        Self(crypto::sha256(bytes))
    }

    /// Parses a rendered fact hash, validating base58 shape and length.
    pub fn parse(s: &str) -> Result<Self> {
        ensure(
            config::FACT_HASH_LENGTH.contains(&s.len()),
            ErrorCode::InvalidFactHash,
            format!(
                "fact hash must be base58 of {} to {} characters",
                config::FACT_HASH_LENGTH.start(),
                config::FACT_HASH_LENGTH.end()
            ),
        )?;
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|_| Error::detail(ErrorCode::InvalidFactHash, "fact hash is not base58"))?;
        let digest: [u8; 32] = decoded.as_slice().try_into().map_err(|_| {
            Error::detail(ErrorCode::InvalidFactHash, "fact hash must decode to 32 bytes")
        })?;
        Ok(Self(digest))
    }

    /// The raw digest, as fed into sign content and operation hashing.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for FactHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crypto::to_base58(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Fact
// ---------------------------------------------------------------------------

/// The shared contract of every fact.
///
/// Implementors provide their hint, token, hash, field bytes, and tagged
/// projection; the canonical byte layout is fixed here so no fact can
/// deviate from `hint ∥ token ∥ fields`.
pub trait Fact {
    /// The fact's own type tag.
    fn hint(&self) -> Hint;

    /// The tag of the operation envelope that will wrap this fact, so the
    /// envelope never re-derives it.
    fn operation_hint(&self) -> Hint;

    /// The uniqueness token.
    fn token(&self) -> &Token;

    /// The content hash, fixed at construction.
    fn hash(&self) -> &FactHash;

    /// The fact's fields in declared order, excluding hint and token.
    /// Items expand to the concatenation of their own bytes, in array
    /// order — order is semantically significant and never sorted.
    fn body_bytes(&self) -> Vec<u8>;

    /// The complete canonical bytes: hint tag, token, fields.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.hint().to_bytes();
        buf.extend_from_slice(&self.token().to_bytes());
        buf.extend_from_slice(&self.body_bytes());
        buf
    }

    /// The tagged JSON projection, including `_hint`, `hash`, and `token`.
    fn to_hinted_json(&self) -> Value;
}

/// Computes the hash a constructor must store: the digest of
/// `hint ∥ token ∥ body`.
pub(crate) fn hash_parts(hint: Hint, token: &Token, body: &[u8]) -> FactHash {
    FactHash::digest(&{
        let mut buf = hint.to_bytes();
        buf.extend_from_slice(&token.to_bytes());
        buf.extend_from_slice(body);
        buf
    })
}

/// The `{_hint, hash, token}` base every fact projection starts from.
pub(crate) fn base_hinted_json(fact: &dyn Fact) -> Value {
    json!({
        "_hint": fact.hint().to_string(),
        "hash": fact.hash().to_string(),
        "token": fact.token().as_str(),
    })
}

/// Merges fact-specific fields into the base projection.
pub(crate) fn extend_json(mut base: Value, fields: Value) -> Value {
    if let (Some(base_map), Value::Object(extra)) = (base.as_object_mut(), fields) {
        base_map.extend(extra);
    }
    base
}

// ---------------------------------------------------------------------------
// AllowedOperation
// ---------------------------------------------------------------------------

/// A capability grant used by account-abstraction documents: "the holder
/// may execute this operation kind on this contract".
///
/// Equality is structural across all three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOperation {
    operation: Hint,
    contract: Address,
    authorized: bool,
}

impl AllowedOperation {
    /// Builds a grant from an explicit operation hint.
    pub fn new(operation: Hint, contract: Address, authorized: bool) -> Self {
        Self {
            operation,
            contract,
            authorized,
        }
    }

    /// Builds an authorizing grant for an operation kind — the common case.
    pub fn grant(kind: OperationKind, contract: Address) -> Self {
        Self::new(kind.operation_hint(), contract, true)
    }

    /// The granted operation's envelope hint.
    pub fn operation(&self) -> Hint {
        self.operation
    }

    /// The contract the grant targets.
    pub fn contract(&self) -> &Address {
        &self.contract
    }

    /// Whether the grant authorizes (rather than revokes) the operation.
    pub fn authorized(&self) -> bool {
        self.authorized
    }

    /// Canonical bytes: operation tag, contract, flag byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.operation.to_bytes();
        buf.extend_from_slice(&self.contract.to_bytes());
        buf.push(u8::from(self.authorized));
        buf
    }

    /// The JSON projection.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "operation": self.operation.to_string(),
            "contract": self.contract.as_str(),
            "authorized": self.authorized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::{CredentialKind, DaoKind};

    fn contract() -> Address {
        Address::from_checksum(&crypto::sha256(b"contract"))
    }

    #[test]
    fn fact_hash_renders_and_parses() {
        let hash = FactHash::digest(b"some fact bytes");
        let rendered = hash.to_string();
        assert!(config::FACT_HASH_LENGTH.contains(&rendered.len()));
        assert_eq!(FactHash::parse(&rendered).unwrap(), hash);
    }

    #[test]
    fn fact_hash_rejects_malformed_strings() {
        assert_eq!(
            FactHash::parse("short").unwrap_err().code,
            ErrorCode::InvalidFactHash
        );
        let not_base58 = "0".repeat(44);
        assert!(FactHash::parse(&not_base58).is_err());
    }

    #[test]
    fn grant_uses_the_operation_envelope_tag() {
        let grant = AllowedOperation::grant(
            OperationKind::Credential(CredentialKind::Issue),
            contract(),
        );
        assert_eq!(
            grant.operation().to_string(),
            "mitum-credential-issue-operation-v0.0.1"
        );
        assert!(grant.authorized());
    }

    #[test]
    fn equality_is_structural() {
        let a = AllowedOperation::grant(OperationKind::Dao(DaoKind::Vote), contract());
        let b = AllowedOperation::grant(OperationKind::Dao(DaoKind::Vote), contract());
        let c = AllowedOperation::grant(OperationKind::Dao(DaoKind::Execute), contract());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            a,
            AllowedOperation::new(a.operation(), contract(), false)
        );
    }

    #[test]
    fn bytes_fold_in_the_flag() {
        let yes = AllowedOperation::grant(OperationKind::Dao(DaoKind::Vote), contract());
        let no = AllowedOperation::new(yes.operation(), contract(), false);
        assert_ne!(yes.to_bytes(), no.to_bytes());
        assert_eq!(yes.to_bytes().last(), Some(&1u8));
        assert_eq!(no.to_bytes().last(), Some(&0u8));
    }

    #[test]
    fn hinted_json_shape() {
        let grant = AllowedOperation::grant(OperationKind::Dao(DaoKind::Propose), contract());
        let v = grant.to_hinted_json();
        assert_eq!(v["operation"], "mitum-dao-propose-operation-v0.0.1");
        assert_eq!(v["contract"], contract().as_str());
        assert_eq!(v["authorized"], true);
    }
}
