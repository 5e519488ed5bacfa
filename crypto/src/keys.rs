//! Ed25519 key derivation.

use attest_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_derivation_is_deterministic() {
        let a = keypair_from_seed(&[3u8; 32]);
        let b = keypair_from_seed(&[3u8; 32]);
        assert_eq!(a.public, b.public);
        assert_ne!(a.public.0, [0u8; 32]);
    }

    #[test]
    fn distinct_seeds_distinct_keys() {
        assert_ne!(
            keypair_from_seed(&[1u8; 32]).public,
            keypair_from_seed(&[2u8; 32]).public
        );
    }
}
