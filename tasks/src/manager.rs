//! The task manager: task ids, committee draws and finalization.

use crate::committee::select_committee;
use crate::error::TaskError;
use crate::history::TaskHistory;
use crate::task::{ConsensusState, Task};
use attest_types::{Address, TaskId, TaskParams, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Id of the implicit genesis task. The first created task gets `GENESIS_TASK + 1`.
pub const GENESIS_TASK: TaskId = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskManager {
    params: TaskParams,
    current_task: TaskId,
    history: TaskHistory,
}

impl TaskManager {
    pub fn new(params: TaskParams) -> Result<Self, TaskError> {
        if params.required_attestors == 0 || params.minimum_attestors == 0 {
            return Err(TaskError::InvalidCommitteeSize);
        }
        let history = TaskHistory::new(params.task_history_capacity)?;
        Ok(Self {
            params,
            current_task: GENESIS_TASK,
            history,
        })
    }

    pub fn params(&self) -> &TaskParams {
        &self.params
    }

    pub fn current_task(&self) -> TaskId {
        self.current_task
    }

    /// Create the next task and draw its committee from `attestors`.
    pub fn create_new_task_request(
        &mut self,
        seed: [u8; 32],
        timestamp: Timestamp,
        attestors: &[Address],
    ) -> Result<&Task, TaskError> {
        let id = self.current_task.checked_add(1).ok_or(TaskError::Overflow)?;
        let committee =
            select_committee(attestors, &seed, id, timestamp, self.params.required_attestors)?;

        let task = Task {
            id,
            seed,
            timestamp_start: timestamp,
            timestamp_end: timestamp.saturating_add_secs(self.params.task_duration_secs),
            committee,
            minimum_attestors_for_claim_creation: self.params.minimum_attestors,
            consensus: ConsensusState::Pending,
            processed: false,
            penalized: Vec::new(),
        };
        info!(
            task_id = id,
            committee_size = task.committee.len(),
            start = %task.timestamp_start,
            "task created"
        );
        self.history.insert(task)?;
        self.current_task = id;
        self.history.get(id, id)
    }

    pub fn fetch_task(&self, id: TaskId) -> Result<&Task, TaskError> {
        self.history.get(id, self.current_task)
    }

    pub fn consensus_reached(&self, id: TaskId) -> Result<bool, TaskError> {
        self.fetch_task(id).map(Task::consensus_reached)
    }

    pub fn set_required_attestors(&mut self, count: u32) -> Result<(), TaskError> {
        if count == 0 {
            return Err(TaskError::InvalidCommitteeSize);
        }
        self.params.required_attestors = count;
        debug!(count, "required attestors changed");
        Ok(())
    }

    pub fn set_minimum_attestors(&mut self, count: u32) -> Result<(), TaskError> {
        if count == 0 {
            return Err(TaskError::InvalidCommitteeSize);
        }
        self.params.minimum_attestors = count;
        debug!(count, "minimum attestors changed");
        Ok(())
    }

    /// Note that `attestor` was penalized for a fraudulent proof on task `id`.
    /// Returns `false` if it already was, in which case nothing changes.
    pub fn record_penalty(&mut self, id: TaskId, attestor: &Address) -> Result<bool, TaskError> {
        let task = self.history.get_mut(id, self.current_task)?;
        if task.penalized.contains(attestor) {
            return Ok(false);
        }
        task.penalized.push(*attestor);
        Ok(true)
    }

    /// Check invariants a deserialized manager cannot guarantee on its own.
    pub fn check_integrity(&self) -> Result<(), TaskError> {
        if self.params.required_attestors == 0 || self.params.minimum_attestors == 0 {
            return Err(TaskError::InvalidCommitteeSize);
        }
        if self.history.capacity() == 0 {
            return Err(TaskError::InvalidHistoryCapacity);
        }
        if self.history.capacity() != u64::from(self.params.task_history_capacity) {
            return Err(TaskError::HistoryMismatch {
                expected: self.params.task_history_capacity,
                actual: self.history.capacity(),
            });
        }
        Ok(())
    }

    /// Record the consensus outcome of task `id` and mark it processed.
    pub fn finalize(&mut self, id: TaskId, outcome: ConsensusState) -> Result<(), TaskError> {
        let task = self.history.get_mut(id, self.current_task)?;
        if task.processed {
            return Err(TaskError::TaskAlreadyProcessed(id));
        }
        task.consensus = outcome;
        task.processed = true;
        info!(task_id = id, ?outcome, "task finalized");
        Ok(())
    }
}
