//! Ed25519 key generation and seed handling.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use tessera_types::{KeyPair, PublicKey, SecretSeed};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("secret seed is not valid hex: {0}")]
    BadHex(String),

    #[error("secret seed must be 32 bytes, got {0}")]
    BadLength(usize),
}

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        secret: SecretSeed(signing_key.to_bytes()),
    }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        secret: SecretSeed(*seed),
    }
}

/// Derive the public key from a secret seed.
pub fn public_from_seed(secret: &SecretSeed) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&secret.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Parse a hex-encoded 32-byte secret seed (the form secrets take in
/// process configuration) into a full key pair.
pub fn keypair_from_secret_hex(secret_hex: &str) -> Result<KeyPair, KeyError> {
    let bytes = hex::decode(secret_hex.trim()).map_err(|e| KeyError::BadHex(e.to_string()))?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyError::BadLength(bytes.len()))?;
    Ok(keypair_from_seed(&seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = generate_keypair();
        assert_ne!(kp.public.0, [0u8; 32]);
        assert_ne!(kp.secret.0, [0u8; 32]);
    }

    #[test]
    fn keypair_from_seed_deterministic() {
        let seed = [42u8; 32];
        let kp1 = keypair_from_seed(&seed);
        let kp2 = keypair_from_seed(&seed);
        assert_eq!(kp1.public, kp2.public);
        assert_eq!(kp1.secret.0, kp2.secret.0);
    }

    #[test]
    fn different_seeds_produce_different_keys() {
        let kp1 = keypair_from_seed(&[1u8; 32]);
        let kp2 = keypair_from_seed(&[2u8; 32]);
        assert_ne!(kp1.public, kp2.public);
    }

    #[test]
    fn public_from_seed_matches_keypair() {
        let kp = generate_keypair();
        assert_eq!(public_from_seed(&kp.secret), kp.public);
    }

    #[test]
    fn secret_hex_roundtrip() {
        let seed = [7u8; 32];
        let kp = keypair_from_secret_hex(&hex::encode(seed)).unwrap();
        assert_eq!(kp.public, keypair_from_seed(&seed).public);
    }

    #[test]
    fn secret_hex_rejects_garbage() {
        assert!(matches!(
            keypair_from_secret_hex("not hex"),
            Err(KeyError::BadHex(_))
        ));
        assert!(matches!(
            keypair_from_secret_hex("abcd"),
            Err(KeyError::BadLength(2))
        ));
    }
}
