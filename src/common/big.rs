//! Arbitrary-precision non-negative integers.
//!
//! Token amounts on the chain routinely exceed 64 bits, and the SDK never
//! does arithmetic on them — it only validates, renders, and encodes. So
//! the magnitude is held as a normalized decimal string: no sign, no
//! leading zeros (except `"0"` itself), digits only. The string *is* the
//! canonical encoding.

use std::fmt;

use crate::error::{ensure, ErrorCode, Result};

/// A validated non-negative integer of arbitrary magnitude.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Big(String);

impl Big {
    /// Parses a decimal string. Fails with `EC_INVALID_BIG_INTERGER` on
    /// anything but plain digits, or on a redundant leading zero.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        ensure(
            !s.is_empty(),
            ErrorCode::InvalidBigInteger,
            "big integer must not be empty",
        )?;
        ensure(
            s.bytes().all(|b| b.is_ascii_digit()),
            ErrorCode::InvalidBigInteger,
            format!("big integer must be decimal digits only, got {s:?}"),
        )?;
        ensure(
            s == "0" || !s.starts_with('0'),
            ErrorCode::InvalidBigInteger,
            format!("big integer must not carry leading zeros, got {s:?}"),
        )?;
        Ok(Self(s.to_owned()))
    }

    /// True when the magnitude is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    /// The normalized decimal rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical bytes: the UTF-8 of the decimal rendering.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone().into_bytes()
    }
}

impl From<u64> for Big {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for Big {
    fn from(value: u128) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Big {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
