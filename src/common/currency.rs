//! Currency identifiers and amounts.

use std::fmt;

use serde_json::{json, Value};

use crate::common::Big;
use crate::error::{ensure, ErrorCode, Result};
use crate::hint;

/// A registered currency's symbol, e.g. `PEN` or `MCC`.
///
/// Three to ten characters, uppercase letters and digits, starting with a
/// letter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyId(String);

impl CurrencyId {
    /// Validates and wraps a currency symbol.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        ensure(
            (3..=10).contains(&s.len()),
            ErrorCode::InvalidCurrencyId,
            format!("currency id length {} out of range [3, 10]", s.len()),
        )?;
        ensure(
            s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
            ErrorCode::InvalidCurrencyId,
            format!("currency id must be uppercase alphanumeric, got {s:?}"),
        )?;
        ensure(
            s.starts_with(|c: char| c.is_ascii_uppercase()),
            ErrorCode::InvalidCurrencyId,
            format!("currency id must start with a letter, got {s:?}"),
        )?;
        Ok(Self(s.to_owned()))
    }

    /// The rendered symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical bytes: the symbol's UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone().into_bytes()
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-negative magnitude of one currency.
///
/// Equality is pairwise on (magnitude, currency); two amounts in different
/// currencies are never equal regardless of magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    big: Big,
    currency: CurrencyId,
}

impl Amount {
    /// Builds an amount from an already-validated magnitude and currency.
    pub fn new(big: Big, currency: CurrencyId) -> Self {
        Self { big, currency }
    }

    /// Convenience: parse both parts.
    pub fn from_parts(amount: impl AsRef<str>, currency: impl AsRef<str>) -> Result<Self> {
        Ok(Self::new(Big::new(amount)?, CurrencyId::new(currency)?))
    }

    /// The magnitude.
    pub fn big(&self) -> &Big {
        &self.big
    }

    /// The currency.
    pub fn currency(&self) -> &CurrencyId {
        &self.currency
    }

    /// Canonical bytes: magnitude bytes followed by currency bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.big.to_bytes();
        buf.extend_from_slice(&self.currency.to_bytes());
        buf
    }

    /// The tagged JSON projection.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": hint::CURRENCY_AMOUNT.to_string(),
            "currency": self.currency.as_str(),
            "amount": self.big.as_str(),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.big, self.currency)
    }
}
