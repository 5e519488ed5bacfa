//! Verification tasks.
//!
//! Each task fixes a committee of attestors, drawn deterministically from the
//! attestor registry, that must sign the claims submitted against it. Tasks
//! are kept in a bounded history and finalized exactly once.

pub mod committee;
pub mod error;
pub mod history;
pub mod manager;
pub mod task;

pub use committee::select_committee;
pub use error::TaskError;
pub use history::TaskHistory;
pub use manager::{TaskManager, GENESIS_TASK};
pub use task::{ConsensusState, Task};
