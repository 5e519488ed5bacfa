//! Versioned, integrity-checked state snapshots.
//!
//! A snapshot is the bincode encoding of [`ProtocolState`] wrapped with a
//! format version and the Blake2b-256 hash of the encoded state.

use attest_crypto::blake2b_256;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::state::ProtocolState;
use crate::NodeError;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: u32,
    pub hash: [u8; 32],
    pub state: Vec<u8>,
}

impl StateSnapshot {
    pub fn capture(state: &ProtocolState) -> Result<Self, NodeError> {
        let bytes = bincode::serialize(state).map_err(|e| NodeError::Snapshot(e.to_string()))?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            hash: blake2b_256(&bytes),
            state: bytes,
        })
    }

    /// Decode the state, rejecting unknown versions, hash mismatches and
    /// states that violate the task manager's invariants.
    pub fn restore(&self) -> Result<ProtocolState, NodeError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(NodeError::Snapshot(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        if blake2b_256(&self.state) != self.hash {
            return Err(NodeError::Snapshot("state hash mismatch".into()));
        }
        let state: ProtocolState =
            bincode::deserialize(&self.state).map_err(|e| NodeError::Snapshot(e.to_string()))?;
        state.check_integrity()?;
        Ok(state)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, NodeError> {
        bincode::serialize(self).map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NodeError> {
        bincode::deserialize(bytes).map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), NodeError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}
