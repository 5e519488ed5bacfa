//! Attestation protocol node.
//!
//! Wires the stake ledger, attestor registry, task manager and consensus
//! verifier into one transactional [`Protocol`]:
//! - every state-changing call commits fully or not at all
//! - committed events fan out through an [`EventBus`]
//! - configuration loads from TOML, logs go through `tracing`
//! - Prometheus metrics and integrity-checked snapshots

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metrics;
pub mod protocol;
pub mod snapshot;
pub mod state;
pub mod tracing_spans;

pub use config::NodeConfig;
pub use error::NodeError;
pub use event::{EventBus, ProtocolEvent};
pub use logging::{init_logging, LogFormat};
pub use metrics::ProtocolMetrics;
pub use protocol::Protocol;
pub use snapshot::{StateSnapshot, SNAPSHOT_VERSION};
pub use state::{ProtocolState, TASK_MANAGER};
