//! # Hints
//!
//! Every serializable entity on the wire self-identifies with a *hint*: a
//! versioned type tag like `mitum-currency-transfer-operation-fact-v0.0.1`.
//! The node's decoder dispatches on these strings, so they are a protocol
//! contract — byte-exact, fixed at construction, never mutated.
//!
//! The registry itself ([`registry`]) is pure data: one enum per operation
//! family, with exhaustive matches from `(kind, role)` to the canonical tag.
//! Dispatch happens on the enums; the strings only materialize at the
//! encode boundary.

mod registry;

pub use registry::{
    CredentialKind, CurrencyKind, DaoKind, NftKind, OperationKind, PaymentKind, PointKind,
    StorageKind, TimestampKind, TokenKind,
};

use std::fmt;

use crate::config;

// ---------------------------------------------------------------------------
// Hint
// ---------------------------------------------------------------------------

/// A versioned type tag.
///
/// Rendered as `"<type_name>-<version>"`. All hints in one build share
/// [`config::HINT_VERSION`]; an entity carries exactly one hint for its
/// whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hint {
    type_name: &'static str,
}

impl Hint {
    /// Wraps a registered type name. Callers go through the registry or the
    /// standalone constants below; arbitrary strings defeat the point.
    pub(crate) const fn new(type_name: &'static str) -> Self {
        Self { type_name }
    }

    /// The bare type name, without the version tag.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The version tag shared by every hint in this build.
    pub fn version(&self) -> &'static str {
        config::HINT_VERSION
    }

    /// Canonical bytes of the rendered tag, as fed into fact hashing.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.type_name, config::HINT_VERSION)
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Which serialized shape of an operation kind a hint tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The fact — the semantic content of the operation.
    Fact,
    /// The enclosing operation envelope.
    Operation,
    /// One sub-record of a batch fact. Not every kind has items.
    Item,
}

// ---------------------------------------------------------------------------
// Standalone tags
// ---------------------------------------------------------------------------

/// Tag of a signature record inside an operation's `signs` array.
pub const FACT_SIGN: Hint = Hint::new("base-fact-sign");

/// Tag of a single weighted public key.
pub const CURRENCY_KEY: Hint = Hint::new("mitum-currency-key");

/// Tag of a multisig key set.
pub const CURRENCY_KEYS: Hint = Hint::new("mitum-currency-keys");

/// Tag of an amount (magnitude + currency) value.
pub const CURRENCY_AMOUNT: Hint = Hint::new("mitum-currency-amount");
