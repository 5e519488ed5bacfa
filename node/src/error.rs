use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("governance error: {0}")]
    Governance(#[from] attest_governance::GovernanceError),

    #[error("task error: {0}")]
    Task(#[from] attest_tasks::TaskError),

    #[error("verification error: {0}")]
    Verification(#[from] attest_verification::VerificationError),

    #[error("claim error: {0}")]
    Claim(#[from] attest_claims::ClaimError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol state lock poisoned")]
    StatePoisoned,
}
