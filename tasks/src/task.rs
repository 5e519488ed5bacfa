use attest_types::{Address, TaskId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusState {
    #[default]
    Pending,
    Reached,
}

/// A verification task and the committee drawn for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub seed: [u8; 32],
    pub timestamp_start: Timestamp,
    /// `timestamp_start + task_duration_secs`.
    pub timestamp_end: Timestamp,
    pub committee: Vec<Address>,
    /// Signatures a claim producer should gather before submitting proofs.
    pub minimum_attestors_for_claim_creation: u32,
    pub consensus: ConsensusState,
    pub processed: bool,
    /// Dissenters already penalized for this task.
    #[serde(default)]
    pub penalized: Vec<Address>,
}

impl Task {
    pub fn committee_size(&self) -> usize {
        self.committee.len()
    }

    pub fn is_committee_member(&self, address: &Address) -> bool {
        self.committee.contains(address)
    }

    pub fn consensus_reached(&self) -> bool {
        self.consensus == ConsensusState::Reached
    }
}
