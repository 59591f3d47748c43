//! Hashing utilities.
//!
//! The wire protocol pins a single hash function for content addressing:
//! SHA-256. Fact hashes, operation hashes, and key-set checksum addresses
//! all go through here, so swapping the function is a network upgrade, not
//! a refactor.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// Feeding parts sequentially into the hasher yields the same digest as
/// hashing their concatenation, minus the temporary buffer. Used for
/// composite layouts like `hint ∥ token ∥ fields`.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Render a digest the way the network does: base58, no checksum, no prefix.
pub fn to_base58(digest: &[u8; 32]) -> String {
    bs58::encode(digest).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256 of the empty string, the canonical test vector.
        let digest = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn multi_matches_concatenation() {
        let multi = sha256_multi(&[b"hello", b" ", b"world"]);
        let single = sha256(b"hello world");
        assert_eq!(multi, single);
    }

    #[test]
    fn base58_roundtrip() {
        let digest = sha256(b"mitum");
        let rendered = to_base58(&digest);
        let decoded = bs58::decode(&rendered).into_vec().unwrap();
        assert_eq!(decoded.as_slice(), digest.as_slice());
    }

    #[test]
    fn rendered_digest_length_is_bounded() {
        // 32 bytes in base58 come out at 43 or 44 characters.
        for seed in 0u8..16 {
            let rendered = to_base58(&sha256(&[seed]));
            assert!((43..=44).contains(&rendered.len()), "len {}", rendered.len());
        }
    }
}
