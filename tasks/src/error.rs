use attest_types::TaskId;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Tasks size limit exceeded: task {id} is outside the retained window ending at {current}")]
    TasksSizeLimitExceeded { id: TaskId, current: TaskId },

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("not enough attestors: committee needs {needed}, registry has {available}")]
    NotEnoughAttestors { needed: u32, available: usize },

    #[error("committee size must be non-zero")]
    InvalidCommitteeSize,

    #[error("task history capacity must be non-zero")]
    InvalidHistoryCapacity,

    #[error("task history holds {actual} slots, parameters require {expected}")]
    HistoryMismatch { expected: u32, actual: u64 },

    #[error("Task already processed: {0}")]
    TaskAlreadyProcessed(TaskId),

    #[error("task id counter overflow")]
    Overflow,
}
