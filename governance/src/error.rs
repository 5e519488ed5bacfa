use attest_types::{Address, Amount, BlockHeight};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("caller {0} is not authorized")]
    Unauthorized(Address),

    // Registry
    #[error("Attestor already exists: {0}")]
    AttestorAlreadyExists(String),

    #[error("Attestor does not exist: {0}")]
    AttestorDoesNotExist(String),

    #[error("Not enough staked tokens: have {have}, need {need}")]
    NotEnoughStakedTokens { have: Amount, need: Amount },

    // Stake lifecycle
    #[error("stake {amount} is below the minimum of {minimum}")]
    StakeBelowMinimum { amount: Amount, minimum: Amount },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("No staked tokens")]
    NoStakedTokens,

    #[error("Unstake already requested at block {0}")]
    UnstakeAlreadyRequested(BlockHeight),

    #[error("Unstake not requested")]
    UnstakeNotRequested,

    #[error("Unbonding period not passed: {remaining} blocks remaining")]
    UnbondingPeriodNotPassed { remaining: u64 },

    #[error("slash of {amount} exceeds total stake {total_staked}")]
    SlashExceedsTotalStake { amount: Amount, total_staked: Amount },

    #[error("slash of {amount} exceeds stake {staked} of attestor {attestor}")]
    SlashExceedsAttestorStake {
        attestor: Address,
        amount: Amount,
        staked: Amount,
    },

    // Rewards
    #[error("No rewards to claim")]
    NoRewardsToClaim,

    #[error("No valid attestors provided")]
    NoValidAttestorsProvided,

    // Value transfer
    #[error("ledger holds {held}, cannot pay out {needed}")]
    InsufficientLedgerBalance { needed: Amount, held: Amount },

    #[error("payout to {to} failed: {reason}")]
    PayoutFailed { to: Address, reason: String },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("invalid parameter value: {0}")]
    InvalidParam(String),
}
