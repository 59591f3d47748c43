//! Ed25519 keypairs behind the rendered key format.
//!
//! The signing key is the only secret in the whole SDK. It is never
//! serialized implicitly, never logged, and never shown by `Debug` — the
//! rendered private key comes out of [`Keypair::private_key`] only when a
//! caller explicitly asks.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;

use crate::config;
use crate::error::{Error, ErrorCode, Result};

use super::Key;

/// An Ed25519 keypair rendered in the network's key format.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generates a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Derives a keypair deterministically from a 32-byte seed.
    ///
    /// The seed is used directly as the Ed25519 secret scalar. A weak seed
    /// makes a weak key; feed it from a CSPRNG or a proper KDF.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Derives a keypair from a hex-encoded 32-byte seed.
    ///
    /// Convenience for loading deterministic keys from config or test
    /// fixtures; production keys belong in [`Keypair::generate`].
    pub fn from_seed_hex(hex_seed: &str) -> Result<Self> {
        let bytes = hex::decode(hex_seed)
            .map_err(|_| Error::detail(ErrorCode::InvalidSeed, "seed is not hex"))?;
        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            Error::detail(ErrorCode::InvalidSeed, "seed must be exactly 32 bytes")
        })?;
        Ok(Self::from_seed(&seed))
    }

    /// Reconstructs a keypair from a rendered private key (`…mpr`).
    pub fn from_private_key(key: &Key) -> Result<Self> {
        if key.is_public() {
            return Err(Error::detail(
                ErrorCode::InvalidPrivateKey,
                "cannot build a keypair from a public key",
            ));
        }
        Ok(Self::from_seed(&key.raw_bytes()))
    }

    /// The rendered private key.
    pub fn private_key(&self) -> Key {
        Key::from_material(&self.signing_key.to_bytes(), config::PRIVATE_KEY_SUFFIX)
    }

    /// The rendered public key.
    pub fn public_key(&self) -> Key {
        Key::from_material(
            &self.signing_key.verifying_key().to_bytes(),
            config::PUBLIC_KEY_SUFFIX,
        )
    }

    /// Signs a message. Ed25519 is deterministic: the same key and message
    /// always produce the same 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }

    /// Verifies a signature made by this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        let sig = Signature::from_bytes(&sig_bytes);
        self.signing_key.verifying_key().verify(message, &sig).is_ok()
    }

    /// Verifies a signature against an arbitrary rendered public key.
    pub fn verify_with_key(public_key: &Key, message: &[u8], signature: &[u8]) -> bool {
        if !public_key.is_public() {
            return false;
        }
        let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.raw_bytes()) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        verifying_key
            .verify(message, &Signature::from_bytes(&sig_bytes))
            .is_ok()
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret material never reaches debug output, not even truncated.
        write!(f, "Keypair(pub={})", self.public_key())
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for Keypair {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_render_with_suffixes() {
        let kp = Keypair::generate();
        assert!(kp.public_key().as_str().ends_with("mpu"));
        assert!(kp.private_key().as_str().ends_with("mpr"));
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = Keypair::generate();
        let sig = kp.sign(b"transfer 10 PEN");
        assert_eq!(sig.len(), 64);
        assert!(kp.verify(b"transfer 10 PEN", &sig));
        assert!(!kp.verify(b"transfer 11 PEN", &sig));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = Keypair::from_seed(&[5; 32]);
        assert_eq!(kp.sign(b"same message"), kp.sign(b"same message"));
    }

    #[test]
    fn from_private_key_roundtrip() {
        let kp = Keypair::generate();
        let restored = Keypair::from_private_key(&kp.private_key()).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
    }

    #[test]
    fn from_public_key_is_rejected() {
        let kp = Keypair::generate();
        assert_eq!(
            Keypair::from_private_key(&kp.public_key()).unwrap_err().code,
            ErrorCode::InvalidPrivateKey
        );
    }

    #[test]
    fn verify_with_foreign_key() {
        let signer = Keypair::generate();
        let sig = signer.sign(b"payload");
        assert!(Keypair::verify_with_key(&signer.public_key(), b"payload", &sig));

        let other = Keypair::generate();
        assert!(!Keypair::verify_with_key(&other.public_key(), b"payload", &sig));
    }

    #[test]
    fn debug_does_not_leak_the_secret() {
        let kp = Keypair::from_seed(&[42; 32]);
        let debug = format!("{kp:?}");
        assert!(debug.starts_with("Keypair(pub="));
        assert!(!debug.contains(kp.private_key().no_suffix()));
    }

    #[test]
    fn seed_derivation_is_deterministic() {
        let a = Keypair::from_seed(&[9; 32]);
        let b = Keypair::from_seed(&[9; 32]);
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn hex_seed_matches_raw_seed() {
        let raw = Keypair::from_seed(&[0xAB; 32]);
        let hexed = Keypair::from_seed_hex(&"ab".repeat(32)).unwrap();
        assert_eq!(raw.public_key(), hexed.public_key());
    }

    #[test]
    fn hex_seed_rejects_bad_input() {
        assert_eq!(
            Keypair::from_seed_hex("not-hex").unwrap_err().code,
            ErrorCode::InvalidSeed
        );
        assert_eq!(
            Keypair::from_seed_hex("abcd").unwrap_err().code,
            ErrorCode::InvalidSeed
        );
    }
}
