//! Protocol parameters: every value the operator may tune.
//!
//! Split by owner: [`StakingParams`] belong to the governance ledger,
//! [`TaskParams`] to the task manager. Each lives in exactly one place at
//! runtime.

use crate::amount::Amount;
use crate::error::TypeError;
use serde::{Deserialize, Serialize};

/// Largest task history a node will allocate.
pub const MAX_TASK_HISTORY_CAPACITY: u32 = 1_000_000;

/// The full parameter set, as loaded from the `[params]` configuration table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolParams {
    pub staking: StakingParams,
    pub tasks: TaskParams,
}

impl ProtocolParams {
    /// Reject values the ledger or task manager cannot run with.
    pub fn validate(&self) -> Result<(), TypeError> {
        self.staking.validate()?;
        self.tasks.validate()
    }
}

fn invalid(name: &'static str, reason: String) -> TypeError {
    TypeError::InvalidParam { name, reason }
}

/// Admission rule for the attestor registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryMode {
    /// Any address may be registered.
    Open,
    /// The address must hold at least `minimum_stake`.
    #[default]
    StakeGated,
}

/// Staking, slashing and verification economics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StakingParams {
    /// Smallest self-stake accepted, and the stake an address needs before it
    /// may be registered as an attestor.
    pub minimum_stake: Amount,

    /// Blocks that must pass between `request_unstake` and `unstake`.
    pub unbonding_period: u64,

    /// Whether registering an attestor requires `minimum_stake`.
    pub registry_mode: RegistryMode,

    /// Payment required per verification call; distributed to honest signers.
    pub verification_cost: Amount,

    /// Whether dishonest committee members are slashed during verification.
    pub slashing_enabled: bool,

    /// Percentage of an attestor's stake slashed for a fraudulent signature.
    pub fraudulent_proof_penalty_pct: u8,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            minimum_stake: Amount::tokens(1),
            unbonding_period: 10,
            registry_mode: RegistryMode::StakeGated,
            verification_cost: Amount::tokens(2),
            slashing_enabled: false,
            fraudulent_proof_penalty_pct: 5,
        }
    }
}

impl StakingParams {
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.fraudulent_proof_penalty_pct > 100 {
            return Err(invalid(
                "fraudulent_proof_penalty_pct",
                format!("must be at most 100, got {}", self.fraudulent_proof_penalty_pct),
            ));
        }
        Ok(())
    }
}

/// Task creation and retention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskParams {
    /// Committee size drawn for every new task.
    pub required_attestors: u32,

    /// Signatures a claim producer is told to gather before submitting;
    /// snapshotted on each task.
    pub minimum_attestors: u32,

    /// Validity window of a task, from its creation timestamp.
    pub task_duration_secs: u64,

    /// Number of most recent tasks retained for lookup.
    pub task_history_capacity: u32,
}

impl Default for TaskParams {
    fn default() -> Self {
        Self {
            required_attestors: 3,
            minimum_attestors: 2,
            task_duration_secs: 30 * 60,
            task_history_capacity: 1000,
        }
    }
}

impl TaskParams {
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.required_attestors == 0 {
            return Err(invalid("required_attestors", "must be non-zero".into()));
        }
        if self.minimum_attestors == 0 {
            return Err(invalid("minimum_attestors", "must be non-zero".into()));
        }
        if self.task_history_capacity == 0 || self.task_history_capacity > MAX_TASK_HISTORY_CAPACITY {
            return Err(invalid(
                "task_history_capacity",
                format!(
                    "must be between 1 and {MAX_TASK_HISTORY_CAPACITY}, got {}",
                    self.task_history_capacity
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let params = ProtocolParams::default();
        assert_eq!(params.staking.registry_mode, RegistryMode::StakeGated);
        assert!(!params.staking.slashing_enabled);
        assert_eq!(params.staking.fraudulent_proof_penalty_pct, 5);
        assert_eq!(params.staking.minimum_stake, Amount::tokens(1));
        assert_eq!(params.staking.verification_cost, Amount::tokens(2));
        assert_eq!(params.tasks.required_attestors, 3);
        assert_eq!(params.tasks.task_history_capacity, 1000);
        params.validate().unwrap();
    }

    #[test]
    fn out_of_range_values_rejected() {
        let mut params = ProtocolParams::default();
        params.staking.fraudulent_proof_penalty_pct = 200;
        assert!(matches!(
            params.validate(),
            Err(TypeError::InvalidParam { name: "fraudulent_proof_penalty_pct", .. })
        ));

        let mut params = ProtocolParams::default();
        params.tasks.task_history_capacity = 0;
        assert!(params.validate().is_err());
        params.tasks.task_history_capacity = MAX_TASK_HISTORY_CAPACITY + 1;
        assert!(params.validate().is_err());

        let mut params = ProtocolParams::default();
        params.tasks.required_attestors = 0;
        assert!(matches!(
            params.validate(),
            Err(TypeError::InvalidParam { name: "required_attestors", .. })
        ));
    }

    #[test]
    fn unknown_keys_rejected() {
        let json = r#"{"staking":{"fraudulent_proof_penalty":5}}"#;
        assert!(serde_json::from_str::<ProtocolParams>(json).is_err());
        let json = r#"{"task":{}}"#;
        assert!(serde_json::from_str::<ProtocolParams>(json).is_err());
    }

    #[test]
    fn partial_tables_fill_in_defaults() {
        let json = r#"{"staking":{"registry_mode":"open","minimum_stake":"5"}}"#;
        let params: ProtocolParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.staking.registry_mode, RegistryMode::Open);
        assert_eq!(params.staking.minimum_stake, Amount::new(5));
        assert_eq!(params.staking.unbonding_period, 10);
        assert_eq!(params.tasks, TaskParams::default());
    }
}
