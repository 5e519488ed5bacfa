use attest_types::ClaimId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("claim identifier mismatch: declared {declared}, computed {computed}")]
    IdentifierMismatch { declared: ClaimId, computed: ClaimId },

    #[error("malformed proof: {0}")]
    Malformed(String),
}
