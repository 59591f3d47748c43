//! # Keys and Key Sets
//!
//! A rendered key is a base58 body (32 bytes of key material) plus a
//! three-character suffix: `mpu` public, `mpr` private. Accounts are
//! controlled by a weighted key set ([`Keys`]) with a signing threshold;
//! the set's checksum digest doubles as the account's address body.

mod keypair;

pub use keypair::Keypair;

use std::fmt;

use serde_json::{json, Value};

use crate::common::Address;
use crate::config;
use crate::crypto;
use crate::error::{ensure, ensure_no_duplicates, ensure_range_len, Error, ErrorCode, Result};
use crate::hint;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A rendered public or private key string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(String);

impl Key {
    /// Validates and wraps a rendered key of either kind.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        ensure(
            s.len() > config::SUFFIX_LENGTH,
            ErrorCode::InvalidKey,
            "key must carry a body before the suffix",
        )?;
        let suffix = &s[s.len() - config::SUFFIX_LENGTH..];
        ensure(
            suffix == config::PUBLIC_KEY_SUFFIX || suffix == config::PRIVATE_KEY_SUFFIX,
            ErrorCode::InvalidKey,
            format!("unknown key suffix {suffix:?}"),
        )?;
        let body = &s[..s.len() - config::SUFFIX_LENGTH];
        let decoded = bs58::decode(body)
            .into_vec()
            .map_err(|_| Error::detail(ErrorCode::InvalidKey, "key body is not base58"))?;
        ensure(
            decoded.len() == config::KEY_LENGTH,
            ErrorCode::InvalidKey,
            format!(
                "key body decodes to {} bytes, expected {}",
                decoded.len(),
                config::KEY_LENGTH
            ),
        )?;
        Ok(Self(s.to_owned()))
    }

    /// Validates a key and additionally requires the public suffix.
    pub fn public(s: impl AsRef<str>) -> Result<Self> {
        let key = Self::new(s)?;
        ensure(
            key.is_public(),
            ErrorCode::InvalidPublicKey,
            format!("expected a public key, got {key}"),
        )?;
        Ok(key)
    }

    /// Validates a key and additionally requires the private suffix.
    pub fn private(s: impl AsRef<str>) -> Result<Self> {
        let key = Self::new(s)?;
        ensure(
            !key.is_public(),
            ErrorCode::InvalidPrivateKey,
            "expected a private key, got a public one",
        )?;
        Ok(key)
    }

    /// Renders raw key material with the given suffix. Internal only: the
    /// input is exactly `KEY_LENGTH` bytes by construction, so the result
    /// always re-validates.
    pub(crate) fn from_material(material: &[u8; config::KEY_LENGTH], suffix: &str) -> Self {
        Self(format!("{}{}", bs58::encode(material).into_string(), suffix))
    }

    /// True for `mpu` keys.
    pub fn is_public(&self) -> bool {
        self.0.ends_with(config::PUBLIC_KEY_SUFFIX)
    }

    /// The base58 body without the suffix.
    pub fn no_suffix(&self) -> &str {
        &self.0[..self.0.len() - config::SUFFIX_LENGTH]
    }

    /// The decoded 32 bytes of key material.
    pub fn raw_bytes(&self) -> [u8; config::KEY_LENGTH] {
        let mut out = [0u8; config::KEY_LENGTH];
        // The constructor proved the body decodes to exactly KEY_LENGTH.
        if let Ok(decoded) = bs58::decode(self.no_suffix()).into_vec() {
            out.copy_from_slice(&decoded);
        }
        out
    }

    /// The rendered form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical bytes: the rendered form's UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone().into_bytes()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// PubKey — a weighted key
// ---------------------------------------------------------------------------

/// A public key with its voting weight inside a key set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PubKey {
    key: Key,
    weight: u8,
}

impl PubKey {
    /// Builds a weighted key. Weight must sit in `[1, 100]`.
    pub fn new(key: Key, weight: u8) -> Result<Self> {
        ensure(
            key.is_public(),
            ErrorCode::InvalidPublicKey,
            format!("key set member must be a public key, got {key}"),
        )?;
        ensure(
            config::WEIGHT.contains(&weight),
            ErrorCode::InvalidWeight,
            format!(
                "weight {weight} out of range [{}, {}]",
                config::WEIGHT.start(),
                config::WEIGHT.end()
            ),
        )?;
        Ok(Self { key, weight })
    }

    /// The key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The weight.
    pub fn weight(&self) -> u8 {
        self.weight
    }

    /// Canonical bytes: key-string bytes followed by the weight in 8-byte
    /// big-endian fill encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.key.to_bytes();
        buf.extend_from_slice(&u64::from(self.weight).to_be_bytes());
        buf
    }

    /// The tagged JSON projection.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": hint::CURRENCY_KEY.to_string(),
            "weight": self.weight,
            "key": self.key.as_str(),
        })
    }
}

// ---------------------------------------------------------------------------
// Keys — a multisig key set
// ---------------------------------------------------------------------------

/// An account's weighted key set and signing threshold.
///
/// Duplicate keys are rejected; whether the weights can actually meet the
/// threshold is a chain-side policy question and deliberately NOT checked
/// here. The set derives a content-addressed checksum which becomes the
/// account's address body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keys {
    keys: Vec<PubKey>,
    threshold: u8,
}

impl Keys {
    /// Builds a key set.
    pub fn new(keys: Vec<PubKey>, threshold: u8) -> Result<Self> {
        ensure_range_len(
            keys.len(),
            &config::KEYS_IN_ACCOUNT,
            ErrorCode::InvalidKeys,
            "account keys",
        )?;
        ensure(
            config::THRESHOLD.contains(&threshold),
            ErrorCode::InvalidThreshold,
            format!(
                "threshold {threshold} out of range [{}, {}]",
                config::THRESHOLD.start(),
                config::THRESHOLD.end()
            ),
        )?;
        ensure_no_duplicates(
            keys.iter().map(|k| k.key().as_str().to_owned()),
            ErrorCode::InvalidKeys,
            "account key",
        )?;
        Ok(Self { keys, threshold })
    }

    /// The keys, in construction order.
    pub fn keys(&self) -> &[PubKey] {
        &self.keys
    }

    /// The signing threshold.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Canonical bytes: member keys sorted bytewise by rendered key string,
    /// then the threshold in fill encoding. Sorting makes the checksum
    /// independent of construction order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sorted: Vec<&PubKey> = self.keys.iter().collect();
        sorted.sort_by(|a, b| a.key().as_str().cmp(b.key().as_str()));

        let mut buf = Vec::new();
        for key in sorted {
            buf.extend_from_slice(&key.to_bytes());
        }
        buf.extend_from_slice(&u64::from(self.threshold).to_be_bytes());
        buf
    }

    /// The checksum digest over [`to_bytes`](Self::to_bytes).
    pub fn checksum(&self) -> [u8; 32] {
        crypto::sha256(&self.to_bytes())
    }

    /// The account address this key set controls.
    pub fn address(&self) -> Address {
        Address::from_checksum(&self.checksum())
    }

    /// The tagged JSON projection. `hash` is the bare base58 checksum,
    /// without the address suffix; `keys` keeps construction order.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": hint::CURRENCY_KEYS.to_string(),
            "hash": crypto::to_base58(&self.checksum()),
            "keys": self.keys.iter().map(PubKey::to_hinted_json).collect::<Vec<_>>(),
            "threshold": self.threshold,
        })
    }
}
