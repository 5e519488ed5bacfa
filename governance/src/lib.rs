//! Stake ledger and attestor registry for the attestation protocol.
//!
//! Attestors bond native value as stake, are slashed for dishonest signing,
//! and accrue rewards for verifications they take part in. The registry maps
//! attestor hosts to their addresses and is the pool committees are drawn
//! from. [`Governance`] puts both behind owner and task-manager access checks.

pub mod access;
pub mod error;
pub mod event;
pub mod governance;
pub mod ledger;
pub mod params;
pub mod payout;
pub mod registry;

pub use access::AccessControl;
pub use error::GovernanceError;
pub use event::GovernanceEvent;
pub use governance::Governance;
pub use ledger::{AttestorAccount, StakeLedger};
pub use params::ParamChange;
pub use payout::{Payout, PayoutError};
pub use registry::AttestorRegistry;
