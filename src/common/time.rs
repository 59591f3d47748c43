//! Timestamps and fact tokens.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::RngCore;

use crate::error::{ensure, Error, ErrorCode, Result};

// ---------------------------------------------------------------------------
// TimeStamp
// ---------------------------------------------------------------------------

/// A UTC instant at millisecond precision.
///
/// One rendering — RFC3339 with exactly three fractional digits and a `Z`
/// offset — serves JSON fields, sign content, and token bytes alike, so
/// the byte layout and the round-trip property stay symmetric. Precision
/// is truncated at construction; two `TimeStamp`s that render equally are
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeStamp(DateTime<Utc>);

impl TimeStamp {
    /// The current wall-clock time, truncated to milliseconds.
    ///
    /// Client-supplied wall clock: a temporal ordering *cue*, never a
    /// strict ordering guarantee.
    pub fn now() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// Builds from Unix milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        // from_timestamp_millis only fails outside the representable
        // range (~±262000 years); the fallback keeps the API total.
        Self(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }

    /// Parses the canonical rendering back into a timestamp.
    pub fn parse(s: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::detail(ErrorCode::InvalidDate, format!("bad timestamp {s:?}: {e}")))?;
        Ok(Self::from_millis(parsed.with_timezone(&Utc).timestamp_millis()))
    }

    /// Unix milliseconds.
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Canonical bytes: the rendering's UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A fact's uniqueness token.
///
/// Account facts carry a random nonce so two otherwise-identical intents
/// hash apart; node facts carry the issuing timestamp's rendering as an
/// anti-replay and ordering cue. Either way the token is an opaque
/// non-empty string once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Wraps a caller-supplied token.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        ensure(
            !s.is_empty(),
            ErrorCode::InvalidToken,
            "fact token must not be empty",
        )?;
        Ok(Self(s))
    }

    /// A fresh random nonce: base58 of 16 OS-random bytes.
    pub fn random() -> Self {
        let mut nonce = [0u8; 16];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        Self(bs58::encode(nonce).into_string())
    }

    /// The current UTC time as a token, for node-originated facts.
    pub fn now() -> Self {
        Self(TimeStamp::now().to_string())
    }

    /// Builds from a specific timestamp, for reproducible node facts.
    pub fn from_timestamp(ts: TimeStamp) -> Self {
        Self(ts.to_string())
    }

    /// The token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical bytes: the token's UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone().into_bytes()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_has_exactly_three_fraction_digits() {
        let ts = TimeStamp::from_millis(1_700_000_000_123);
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn parse_roundtrip_preserves_equality() {
        let ts = TimeStamp::from_millis(1_700_000_000_123);
        let back = TimeStamp::parse(&ts.to_string()).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            TimeStamp::parse("yesterday-ish").unwrap_err().code,
            ErrorCode::InvalidDate
        );
    }

    #[test]
    fn now_is_millisecond_truncated() {
        let ts = TimeStamp::now();
        let back = TimeStamp::parse(&ts.to_string()).unwrap();
        assert_eq!(ts.timestamp_millis(), back.timestamp_millis());
    }

    #[test]
    fn random_tokens_differ() {
        assert_ne!(Token::random(), Token::random());
    }

    #[test]
    fn token_rejects_empty() {
        assert_eq!(Token::new("").unwrap_err().code, ErrorCode::InvalidToken);
    }

    #[test]
    fn timestamp_token_matches_rendering() {
        let ts = TimeStamp::from_millis(1_700_000_000_000);
        let token = Token::from_timestamp(ts);
        assert_eq!(token.as_str(), ts.to_string());
    }
}
