use attest_claims::ClaimError;
use attest_types::{Address, Amount, ClaimId, TaskId};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Task already processed: {0}")]
    TaskAlreadyProcessed(TaskId),

    #[error("Verification underpriced: paid {payment}, cost is {cost}")]
    VerificationUnderpriced { payment: Amount, cost: Amount },

    #[error("no signatures to verify")]
    NoSignatures,

    #[error("claim identifier mismatch: declared {declared}, computed {computed}")]
    ClaimIdentifierMismatch { declared: ClaimId, computed: ClaimId },

    #[error("Duplicate signatures found: {0} signed more than once")]
    DuplicateSignaturesFound(Address),

    #[error("Consensus failed: {valid} of {committee_size} committee signatures")]
    ConsensusFailed { valid: usize, committee_size: usize },

    #[error("malformed proof: {0}")]
    Malformed(String),
}

impl From<ClaimError> for VerificationError {
    fn from(e: ClaimError) -> Self {
        match e {
            ClaimError::IdentifierMismatch { declared, computed } => {
                Self::ClaimIdentifierMismatch { declared, computed }
            }
            ClaimError::Malformed(reason) => Self::Malformed(reason),
        }
    }
}
