//! Operator-tunable staking parameters.

use crate::error::GovernanceError;
use attest_types::{Amount, RegistryMode, StakingParams};
use serde::{Deserialize, Serialize};

/// A single change to [`StakingParams`], applied by the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamChange {
    MinimumStake(Amount),
    UnbondingPeriod(u64),
    VerificationCost(Amount),
    SlashingEnabled(bool),
    FraudulentProofPenaltyPct(u8),
    RegistryMode(RegistryMode),
}

impl ParamChange {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MinimumStake(_) => "minimum_stake",
            Self::UnbondingPeriod(_) => "unbonding_period",
            Self::VerificationCost(_) => "verification_cost",
            Self::SlashingEnabled(_) => "slashing_enabled",
            Self::FraudulentProofPenaltyPct(_) => "fraudulent_proof_penalty_pct",
            Self::RegistryMode(_) => "registry_mode",
        }
    }

    pub fn apply(&self, params: &mut StakingParams) -> Result<(), GovernanceError> {
        match *self {
            Self::MinimumStake(v) => params.minimum_stake = v,
            Self::UnbondingPeriod(v) => params.unbonding_period = v,
            Self::VerificationCost(v) => params.verification_cost = v,
            Self::SlashingEnabled(v) => params.slashing_enabled = v,
            Self::FraudulentProofPenaltyPct(v) => {
                if v > 100 {
                    return Err(GovernanceError::InvalidParam(format!(
                        "fraudulent_proof_penalty_pct must be at most 100, got {v}"
                    )));
                }
                params.fraudulent_proof_penalty_pct = v;
            }
            Self::RegistryMode(v) => params.registry_mode = v,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_above_hundred_rejected() {
        let mut params = StakingParams::default();
        assert!(ParamChange::FraudulentProofPenaltyPct(101)
            .apply(&mut params)
            .is_err());
        ParamChange::FraudulentProofPenaltyPct(100)
            .apply(&mut params)
            .unwrap();
        assert_eq!(params.fraudulent_proof_penalty_pct, 100);
    }

    #[test]
    fn change_applies_to_its_field() {
        let mut params = StakingParams::default();
        ParamChange::VerificationCost(Amount::new(2))
            .apply(&mut params)
            .unwrap();
        assert_eq!(params.verification_cost, Amount::new(2));
        assert_eq!(
            ParamChange::VerificationCost(Amount::new(2)).name(),
            "verification_cost"
        );
    }
}
