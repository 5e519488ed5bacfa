//! Span constructors for protocol operations, so every log line emitted
//! inside an operation carries the same names and fields.

use attest_types::{Address, TaskId};
use tracing::{info_span, Span};

/// A single state-changing call, named by operation and caller.
pub fn operation_span(op: &'static str, caller: &Address) -> Span {
    info_span!("operation", op, caller = %caller)
}

/// Verification of the proofs submitted against one task.
pub fn verification_span(task_id: TaskId, proofs: usize) -> Span {
    info_span!("verify", task_id, proofs)
}

/// Creation of a task and its committee draw.
pub fn task_span(seed: &[u8; 32]) -> Span {
    info_span!("create_task", seed = %hex_prefix(seed))
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
