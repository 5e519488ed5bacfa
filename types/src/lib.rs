//! Fundamental types for the attestation protocol.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! principal addresses, claim hashes, native-currency amounts, keys, timestamps,
//! block heights and the governable protocol parameters.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod params;
pub mod time;

mod hex_serde;

pub use address::Address;
pub use amount::Amount;
pub use error::TypeError;
pub use hash::ClaimId;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::{
    ProtocolParams, RegistryMode, StakingParams, TaskParams, MAX_TASK_HISTORY_CAPACITY,
};
pub use time::{BlockHeight, ChainClock, Timestamp};

/// Sequential identifier of a verification task.
pub type TaskId = u64;
