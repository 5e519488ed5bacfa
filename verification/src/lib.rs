//! Consensus verification of claim proofs.
//!
//! A task's committee signs claims off-ledger; this crate checks the
//! submitted proofs (identifier integrity, signature recovery, duplicate
//! signers) and tallies committee signatures per claim identifier. Consensus
//! needs a strict majority of the committee on one identifier. Committee
//! members that signed a conflicting identifier are reported as dissenters so
//! the caller can slash them.

pub mod error;
pub mod tally;
pub mod verifier;

pub use error::VerificationError;
pub use tally::Tally;
pub use verifier::{check_admission, evaluate, verify, Verdict};
