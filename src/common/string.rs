//! Length-capped strings.

use std::fmt;

use crate::config;
use crate::error::{ensure, ErrorCode, Result};

/// A non-empty string capped at [`config::MAX_LONG_STRING_LEN`] bytes.
///
/// Used wherever the chain accepts free-form text (DID documents, data
/// payloads, contract metadata) — the cap bounds state growth node-side,
/// and the SDK enforces it eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LongString(String);

impl LongString {
    /// Validates and wraps a string.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        ensure(
            !s.is_empty(),
            ErrorCode::EmptyString,
            "long string must not be empty",
        )?;
        ensure(
            s.len() <= config::MAX_LONG_STRING_LEN,
            ErrorCode::InvalidLength,
            format!(
                "long string is {} bytes, cap is {}",
                s.len(),
                config::MAX_LONG_STRING_LEN
            ),
        )?;
        Ok(Self(s))
    }

    /// The wrapped string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical bytes: the string's UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone().into_bytes()
    }
}

impl fmt::Display for LongString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_up_to_the_cap() {
        let max = "a".repeat(config::MAX_LONG_STRING_LEN);
        assert!(LongString::new(max).is_ok());
    }

    #[test]
    fn rejects_over_the_cap() {
        let over = "a".repeat(config::MAX_LONG_STRING_LEN + 1);
        assert_eq!(
            LongString::new(over).unwrap_err().code,
            ErrorCode::InvalidLength
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            LongString::new("").unwrap_err().code,
            ErrorCode::EmptyString
        );
    }

    #[test]
    fn cap_is_bytes_not_chars() {
        // Multi-byte characters count by encoded length.
        let s = "é".repeat(config::MAX_LONG_STRING_LEN / 2 + 1);
        assert!(LongString::new(s).is_err());
    }
}
