//! # Error Taxonomy
//!
//! Three independent code spaces cover everything that can go wrong:
//!
//! - **Process codes** ([`ErrorCode`], `EC_*`) — local validation failures
//!   raised synchronously at construction, encode, or sign time. These are
//!   the only errors this crate produces itself.
//! - **Node phase codes** (`PCODE`) and **domain codes** (`DCODE`) — the
//!   remote node reports failures as free text; [`classify`] maps known
//!   keyword substrings back to structured codes for caller diagnostics.
//!
//! Every fallible constructor in the crate fails atomically: either the
//! value is fully valid, or an [`Error`] with a fixed code comes back and
//! no partial object is observable.

mod classify;

pub use classify::{assign_code_from_error_message, NodeCode, DCODE, PCODE};

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error as ThisError;

// ---------------------------------------------------------------------------
// Process Error Codes
// ---------------------------------------------------------------------------

/// Fixed string codes for local validation failures.
///
/// The rendered `EC_*` strings are shared across the Mitum SDK family and
/// matched by integrators' tooling, so they are load-bearing — including
/// their historical spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoApi,
    Unknown,
    OpSizeExceeded,
    EmptyString,
    EmptySign,
    InvalidDate,
    InvalidLength,
    InvalidSeed,
    InvalidKey,
    InvalidKeys,
    InvalidKeyPair,
    InvalidPrivateKey,
    InvalidPublicKey,
    InvalidWeight,
    InvalidThreshold,
    InvalidAddress,
    InvalidBigInteger,
    InvalidFloat,
    InvalidHint,
    InvalidToken,
    InvalidCurrencyId,
    InvalidNetworkId,
    InvalidItem,
    InvalidItems,
    InvalidFactSign,
    InvalidFact,
    InvalidFactHash,
    InvalidOperation,
    InvalidAmount,
    InvalidAmounts,
    FailSign,
    TimeOut,
    TransactionReverted,
}

impl ErrorCode {
    /// The wire-stable `EC_*` string for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoApi => "EC_NO_API",
            Self::Unknown => "EC_UNKNOWN",
            Self::OpSizeExceeded => "EC_OP_SIZE_EXCEEDED",
            Self::EmptyString => "EC_EMPTY_STRING",
            Self::EmptySign => "EC_EMPTY_SIGN",
            Self::InvalidDate => "EC_INVALID_DATE",
            Self::InvalidLength => "EC_INVALID_LENGTH",
            Self::InvalidSeed => "EC_INVALID_SEED",
            Self::InvalidKey => "EC_INVALID_KEY",
            Self::InvalidKeys => "EC_INVALID_KEYS",
            Self::InvalidKeyPair => "EC_INVALID_KEY_PAIR",
            Self::InvalidPrivateKey => "EC_INVALID_PRIVATE_KEY",
            Self::InvalidPublicKey => "EC_INVALID_PUBLIC_KEY",
            Self::InvalidWeight => "EC_INVALID_WEIGHT",
            Self::InvalidThreshold => "EC_INVALID_THRESHOLD",
            Self::InvalidAddress => "EC_INVALID_ADDRESS",
            // Historical spelling, kept for parity with the other SDKs.
            Self::InvalidBigInteger => "EC_INVALID_BIG_INTERGER",
            Self::InvalidFloat => "EC_INVALID_FLOAT",
            Self::InvalidHint => "EC_INVALID_HINT",
            Self::InvalidToken => "EC_INVALID_TOKEN",
            Self::InvalidCurrencyId => "EC_INVALID_CURRENCY_ID",
            Self::InvalidNetworkId => "EC_INVALID_NETWORK_ID",
            Self::InvalidItem => "EC_INVALID_ITEM",
            Self::InvalidItems => "EC_INVALID_ITEMS",
            Self::InvalidFactSign => "EC_INVALID_FACTSIGN",
            Self::InvalidFact => "EC_INVALID_FACT",
            Self::InvalidFactHash => "EC_INVALID_FACT_HASH",
            Self::InvalidOperation => "EC_INVALID_OPERATION",
            Self::InvalidAmount => "EC_INVALID_AMOUNT",
            Self::InvalidAmounts => "EC_INVALID_AMOUNTS",
            Self::FailSign => "EC_FAIL_SIGN",
            Self::TimeOut => "EC_TIME_OUT",
            Self::TransactionReverted => "EC_TRANSACTION_REVERTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A validation or processing failure with a fixed code and a free-text
/// detail message.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("[{code}] {message}")]
pub struct Error {
    /// Which rule was violated.
    pub code: ErrorCode,
    /// Human-readable detail. Never parsed — the code is the contract.
    pub message: String,
}

impl Error {
    /// Builds an error with the given code and detail message.
    pub fn detail(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Assertion Helpers
// ---------------------------------------------------------------------------

/// Fails with `code`/`message` unless `cond` holds.
///
/// The workhorse of every validating constructor: check, or return the
/// typed error before any state is built.
pub fn ensure(cond: bool, code: ErrorCode, message: impl Into<String>) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::detail(code, message))
    }
}

/// Fails with `code` when the iterator yields the same projection twice.
///
/// Used for batch-fact targets, per-item currency sets, and multisig key
/// sets, where a duplicate always indicates malformed intent.
pub fn ensure_no_duplicates<I, K>(
    items: I,
    code: ErrorCode,
    what: &str,
) -> Result<()>
where
    I: IntoIterator<Item = K>,
    K: fmt::Display,
{
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.to_string()) {
            return Err(Error::detail(
                code,
                format!("duplicate {what} found: {item}"),
            ));
        }
    }
    Ok(())
}

/// Fails with `code` when `len` falls outside `range`.
pub fn ensure_range_len(
    len: usize,
    range: &RangeInclusive<usize>,
    code: ErrorCode,
    what: &str,
) -> Result<()> {
    ensure(
        range.contains(&len),
        code,
        format!(
            "{what} length {len} out of range [{}, {}]",
            range.start(),
            range.end()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_code_and_detail() {
        let err = Error::detail(ErrorCode::InvalidAddress, "bad suffix");
        assert_eq!(err.to_string(), "[EC_INVALID_ADDRESS] bad suffix");
    }

    #[test]
    fn ensure_passes_and_fails() {
        assert!(ensure(true, ErrorCode::Unknown, "unused").is_ok());
        let err = ensure(false, ErrorCode::EmptySign, "no sign").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptySign);
    }

    #[test]
    fn duplicate_detection_names_the_offender() {
        let err = ensure_no_duplicates(
            ["a", "b", "a"],
            ErrorCode::InvalidItems,
            "receiver",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidItems);
        assert!(err.message.contains("receiver"));
        assert!(err.message.contains('a'));
    }

    #[test]
    fn no_duplicates_on_distinct_input() {
        assert!(ensure_no_duplicates(["x", "y"], ErrorCode::InvalidKeys, "key").is_ok());
    }

    #[test]
    fn range_len_bounds_are_inclusive() {
        let range = 1..=3;
        assert!(ensure_range_len(1, &range, ErrorCode::InvalidItems, "items").is_ok());
        assert!(ensure_range_len(3, &range, ErrorCode::InvalidItems, "items").is_ok());
        assert!(ensure_range_len(0, &range, ErrorCode::InvalidItems, "items").is_err());
        assert!(ensure_range_len(4, &range, ErrorCode::InvalidItems, "items").is_err());
    }

    #[test]
    fn historical_code_spellings_are_stable() {
        assert_eq!(ErrorCode::InvalidBigInteger.as_str(), "EC_INVALID_BIG_INTERGER");
        assert_eq!(ErrorCode::InvalidFactSign.as_str(), "EC_INVALID_FACTSIGN");
    }
}
