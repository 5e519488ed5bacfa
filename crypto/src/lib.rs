//! Cryptographic primitives for the attestation protocol.
//!
//! - **Ed25519** for claim signing and signature verification
//! - **Blake2b-256** for claim identifiers, committee scoring and snapshots
//! - Address derivation: the last 20 bytes of Blake2b-256(public key)

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use hash::{blake2b_256, blake2b_256_fields, blake2b_256_multi};
pub use keys::keypair_from_seed;
pub use sign::{sign_message, verify_signature};
