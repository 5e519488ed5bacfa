use attest_types::{Address, Amount, BlockHeight};
use serde::{Deserialize, Serialize};

/// Observable ledger and registry changes, buffered until the caller drains
/// them after a successful commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    Staked {
        attestor: Address,
        amount: Amount,
        staked: Amount,
    },
    StakeDelegated {
        beneficiary: Address,
        amount: Amount,
    },
    UnstakeRequested {
        attestor: Address,
        block: BlockHeight,
    },
    Unstaked {
        attestor: Address,
        amount: Amount,
    },
    Slashed {
        amount: Amount,
    },
    AttestorSlashed {
        attestor: Address,
        amount: Amount,
    },
    RewardsRegistered {
        rewards: Vec<(Address, Amount)>,
    },
    RewardsClaimed {
        attestor: Address,
        amount: Amount,
    },
    Withdrawn {
        to: Address,
        amount: Amount,
    },
    AttestorAdded {
        host: String,
        address: Address,
    },
    AttestorRemoved {
        host: String,
        address: Address,
    },
    OwnershipTransferred {
        previous: Address,
        new: Address,
    },
    TaskManagerSet {
        task_manager: Address,
    },
    ParamChanged {
        param: String,
    },
}
