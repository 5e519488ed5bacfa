//! Principal address derivation from public keys.
//!
//! Address = last 20 bytes of Blake2b-256(public_key).

use attest_types::{Address, PublicKey};

/// Derive the 20-byte principal address owned by a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let hash = crate::blake2b_256(public_key.as_bytes());
    let mut bytes = [0u8; Address::LEN];
    bytes.copy_from_slice(&hash[32 - Address::LEN..]);
    Address::new(bytes)
}
