//! Account and node addresses.
//!
//! An address is a base58 body followed by a three-character type suffix:
//! `mca` for regular accounts (the body is the checksum of the account's
//! key set), `sas` for consensus nodes. Validation is structural only —
//! whether the account exists is the chain's business.

use std::fmt;

use crate::config;
use crate::error::{ensure, ErrorCode, Result};

fn validate_body_charset(s: &str, code: ErrorCode) -> Result<()> {
    const BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
    ensure(
        s.chars().all(|c| BASE58.contains(c)),
        code,
        format!("address body must be base58, got {s:?}"),
    )
}

/// A regular account address (`…mca`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// Validates and wraps a rendered address string.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        ensure(
            config::ADDRESS_LENGTH.contains(&s.len()),
            ErrorCode::InvalidAddress,
            format!(
                "address length {} out of range [{}, {}]",
                s.len(),
                config::ADDRESS_LENGTH.start(),
                config::ADDRESS_LENGTH.end()
            ),
        )?;
        ensure(
            s.ends_with(config::ADDRESS_SUFFIX),
            ErrorCode::InvalidAddress,
            format!("account address must end with {:?}", config::ADDRESS_SUFFIX),
        )?;
        let body = &s[..s.len() - config::SUFFIX_LENGTH];
        validate_body_charset(body, ErrorCode::InvalidAddress)?;
        Ok(Self(s.to_owned()))
    }

    /// Builds the address for a 32-byte checksum digest: base58 body plus
    /// the account suffix.
    pub(crate) fn from_checksum(digest: &[u8; 32]) -> Self {
        Self(format!(
            "{}{}",
            crate::crypto::to_base58(digest),
            config::ADDRESS_SUFFIX
        ))
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

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A consensus node address (`…sas`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeAddress(String);

impl NodeAddress {
    /// Validates and wraps a rendered node address.
    ///
    /// Node address bodies are operator-chosen labels, not checksums, so
    /// only the suffix and non-emptiness are enforced.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        ensure(
            s.len() > config::SUFFIX_LENGTH,
            ErrorCode::InvalidAddress,
            "node address must carry a body before the suffix",
        )?;
        ensure(
            s.ends_with(config::NODE_ADDRESS_SUFFIX),
            ErrorCode::InvalidAddress,
            format!(
                "node address must end with {:?}",
                config::NODE_ADDRESS_SUFFIX
            ),
        )?;
        Ok(Self(s.to_owned()))
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

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256;

    fn sample() -> Address {
        Address::from_checksum(&sha256(b"sample account"))
    }

    #[test]
    fn checksum_addresses_validate() {
        let addr = sample();
        assert!(addr.as_str().ends_with("mca"));
        assert_eq!(Address::new(addr.as_str()).unwrap(), addr);
    }

    #[test]
    fn rejects_wrong_suffix() {
        let mut s = sample().as_str().to_owned();
        s.replace_range(s.len() - 3.., "sas");
        let err = Address::new(&s).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAddress);
    }

    #[test]
    fn rejects_bad_charset() {
        // '0', 'O', 'I', 'l' are outside the base58 alphabet.
        let s = format!("{}0{}mca", "2".repeat(20), "2".repeat(20));
        assert!(Address::new(s).is_err());
    }

    #[test]
    fn rejects_out_of_range_length() {
        assert_eq!(
            Address::new("abcmca").unwrap_err().code,
            ErrorCode::InvalidAddress
        );
        let long = format!("{}mca", "2".repeat(60));
        assert!(Address::new(long).is_err());
    }

    #[test]
    fn node_address_accepts_labels() {
        let node = NodeAddress::new("no0sas").unwrap();
        assert_eq!(node.as_str(), "no0sas");
    }

    #[test]
    fn node_address_requires_suffix_and_body() {
        assert!(NodeAddress::new("sas").is_err());
        assert!(NodeAddress::new("no0mca").is_err());
    }

    #[test]
    fn bytes_match_rendering() {
        let addr = sample();
        assert_eq!(addr.to_bytes(), addr.as_str().as_bytes());
    }
}
