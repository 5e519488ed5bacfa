//! Bounded task history.
//!
//! Tasks live in a fixed number of slots indexed by `id % capacity`, so a new
//! task overwrites the one created `capacity` ids earlier.

use crate::error::TaskError;
use crate::task::Task;
use attest_types::TaskId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistory {
    slots: Vec<Option<Task>>,
}

impl TaskHistory {
    pub fn new(capacity: u32) -> Result<Self, TaskError> {
        if capacity == 0 {
            return Err(TaskError::InvalidHistoryCapacity);
        }
        Ok(Self {
            slots: vec![None; capacity as usize],
        })
    }

    pub fn capacity(&self) -> u64 {
        self.slots.len() as u64
    }

    fn slot(&self, id: TaskId) -> Result<usize, TaskError> {
        id.checked_rem(self.capacity())
            .map(|slot| slot as usize)
            .ok_or(TaskError::InvalidHistoryCapacity)
    }

    /// Whether `id` falls in `[current - capacity + 1, current]`.
    pub fn in_window(&self, id: TaskId, current: TaskId) -> bool {
        id <= current && current - id < self.capacity()
    }

    pub fn insert(&mut self, task: Task) -> Result<(), TaskError> {
        let slot = self.slot(task.id)?;
        self.slots[slot] = Some(task);
        Ok(())
    }

    pub fn get(&self, id: TaskId, current: TaskId) -> Result<&Task, TaskError> {
        if !self.in_window(id, current) {
            return Err(TaskError::TasksSizeLimitExceeded { id, current });
        }
        self.slots[self.slot(id)?]
            .as_ref()
            .filter(|t| t.id == id)
            .ok_or(TaskError::TaskNotFound(id))
    }

    pub fn get_mut(&mut self, id: TaskId, current: TaskId) -> Result<&mut Task, TaskError> {
        if !self.in_window(id, current) {
            return Err(TaskError::TasksSizeLimitExceeded { id, current });
        }
        let slot = self.slot(id)?;
        self.slots[slot]
            .as_mut()
            .filter(|t| t.id == id)
            .ok_or(TaskError::TaskNotFound(id))
    }
}
