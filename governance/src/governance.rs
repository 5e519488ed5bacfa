//! The caller-checked facade over the stake ledger and attestor registry.

use crate::access::AccessControl;
use crate::error::GovernanceError;
use crate::event::GovernanceEvent;
use crate::ledger::StakeLedger;
use crate::params::ParamChange;
use crate::payout::Payout;
use crate::registry::AttestorRegistry;
use attest_types::{Address, Amount, BlockHeight, RegistryMode, StakingParams};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Staking, rewards and the attestor registry behind one access-controlled
/// surface.
///
/// Events accumulate in an internal buffer; callers drain them with
/// [`Governance::drain_events`] once the surrounding operation has committed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Governance {
    params: StakingParams,
    access: AccessControl,
    ledger: StakeLedger,
    registry: AttestorRegistry,
    #[serde(skip)]
    events: Vec<GovernanceEvent>,
}

impl Governance {
    pub fn new(owner: Address, params: StakingParams) -> Self {
        Self {
            params,
            access: AccessControl::new(owner),
            ledger: StakeLedger::new(),
            registry: AttestorRegistry::new(),
            events: Vec::new(),
        }
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn ledger(&self) -> &StakeLedger {
        &self.ledger
    }

    pub fn registry(&self) -> &AttestorRegistry {
        &self.registry
    }

    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Staking ─────────────────────────────────────────────────────────

    /// Stake `amount` for the caller. The amount is paid into the ledger.
    pub fn stake(&mut self, caller: &Address, amount: Amount) -> Result<Amount, GovernanceError> {
        if amount.is_zero() {
            return Err(GovernanceError::ZeroAmount);
        }
        if amount < self.params.minimum_stake {
            return Err(GovernanceError::StakeBelowMinimum {
                amount,
                minimum: self.params.minimum_stake,
            });
        }
        let staked = self.ledger.credit_stake(*caller, amount)?;
        info!(attestor = %caller, %amount, %staked, "stake credited");
        self.events.push(GovernanceEvent::Staked {
            attestor: *caller,
            amount,
            staked,
        });
        Ok(staked)
    }

    /// Credit stake to `beneficiary` on the owner's payment. No minimum applies.
    pub fn delegate_stake(
        &mut self,
        caller: &Address,
        beneficiary: &Address,
        amount: Amount,
    ) -> Result<Amount, GovernanceError> {
        self.access.ensure_owner(caller)?;
        let staked = self.ledger.credit_stake(*beneficiary, amount)?;
        info!(attestor = %beneficiary, %amount, %staked, "stake delegated");
        self.events.push(GovernanceEvent::StakeDelegated {
            beneficiary: *beneficiary,
            amount,
        });
        Ok(staked)
    }

    pub fn request_unstake(
        &mut self,
        caller: &Address,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        self.ledger.request_unstake(caller, now)?;
        info!(attestor = %caller, block = now.as_u64(), "unstake requested");
        self.events.push(GovernanceEvent::UnstakeRequested {
            attestor: *caller,
            block: now,
        });
        Ok(())
    }

    pub fn unstake(
        &mut self,
        caller: &Address,
        now: BlockHeight,
        payout: &mut dyn Payout,
    ) -> Result<Amount, GovernanceError> {
        let amount = self
            .ledger
            .unstake(caller, now, self.params.unbonding_period, payout)?;
        info!(attestor = %caller, %amount, "stake withdrawn");
        self.events.push(GovernanceEvent::Unstaked {
            attestor: *caller,
            amount,
        });
        Ok(amount)
    }

    // ── Slashing ────────────────────────────────────────────────────────

    /// Slash `amount` from the global stake pool, spread over all stakers.
    pub fn slash(&mut self, caller: &Address, amount: Amount) -> Result<(), GovernanceError> {
        self.access.ensure_owner(caller)?;
        let deductions = self.ledger.slash_total(amount)?;
        warn!(%amount, accounts = deductions.len(), "global stake slashed");
        self.events.push(GovernanceEvent::Slashed { amount });
        Ok(())
    }

    pub fn slash_attestor(
        &mut self,
        caller: &Address,
        attestor: &Address,
        amount: Amount,
    ) -> Result<Amount, GovernanceError> {
        self.access.ensure_operator(caller)?;
        let remaining = self.ledger.slash_account(attestor, amount)?;
        warn!(%attestor, %amount, %remaining, "attestor slashed");
        self.events.push(GovernanceEvent::AttestorSlashed {
            attestor: *attestor,
            amount,
        });
        Ok(remaining)
    }

    /// The penalty a fraudulent signature costs `attestor`:
    /// `fraudulent_proof_penalty_pct` percent of its stake, floored.
    pub fn fraud_penalty(&self, attestor: &Address) -> Amount {
        self.ledger
            .staked_amount(attestor)
            .mul_div_floor(u128::from(self.params.fraudulent_proof_penalty_pct), 100)
            .unwrap_or(Amount::ZERO)
    }

    /// Slash `attestor` by its fraud penalty. A zero penalty is a no-op.
    pub fn slash_for_fraud(
        &mut self,
        caller: &Address,
        attestor: &Address,
    ) -> Result<Amount, GovernanceError> {
        self.access.ensure_operator(caller)?;
        let penalty = self.fraud_penalty(attestor);
        if penalty.is_zero() {
            debug!(%attestor, "fraud penalty rounds to zero");
            return Ok(penalty);
        }
        self.slash_attestor(caller, attestor, penalty)?;
        Ok(penalty)
    }

    // ── Rewards and value ───────────────────────────────────────────────

    /// Distribute `cost` over the registered, staked `candidates`.
    pub fn register_rewards(
        &mut self,
        caller: &Address,
        candidates: &[Address],
        cost: Amount,
    ) -> Result<Vec<(Address, Amount)>, GovernanceError> {
        self.access.ensure_operator(caller)?;
        let registry = &self.registry;
        let rewards = self
            .ledger
            .register_rewards(candidates, cost, |a| registry.contains_address(a))?;
        if rewards.is_empty() {
            debug!("no stake in ledger, rewards skipped");
            return Ok(rewards);
        }
        info!(%cost, recipients = rewards.len(), "rewards registered");
        self.events.push(GovernanceEvent::RewardsRegistered {
            rewards: rewards.clone(),
        });
        Ok(rewards)
    }

    pub fn claim_rewards(
        &mut self,
        caller: &Address,
        payout: &mut dyn Payout,
    ) -> Result<Amount, GovernanceError> {
        let amount = self.ledger.claim_rewards(caller, payout)?;
        info!(attestor = %caller, %amount, "rewards claimed");
        self.events.push(GovernanceEvent::RewardsClaimed {
            attestor: *caller,
            amount,
        });
        Ok(amount)
    }

    /// Pay the ledger's whole held balance to the owner.
    pub fn withdraw(
        &mut self,
        caller: &Address,
        payout: &mut dyn Payout,
    ) -> Result<Amount, GovernanceError> {
        self.access.ensure_owner(caller)?;
        let owner = self.access.owner();
        let amount = self.ledger.withdraw_all(&owner, payout)?;
        info!(to = %owner, %amount, "ledger balance withdrawn");
        self.events.push(GovernanceEvent::Withdrawn { to: owner, amount });
        Ok(amount)
    }

    /// Record a payment that accompanied a value-bearing call.
    pub fn receive_payment(&mut self, amount: Amount) -> Result<(), GovernanceError> {
        self.ledger.receive_payment(amount)
    }

    // ── Registry ────────────────────────────────────────────────────────

    pub fn add_attestor(
        &mut self,
        caller: &Address,
        host: &str,
        address: Address,
    ) -> Result<(), GovernanceError> {
        self.access.ensure_owner(caller)?;
        if self.params.registry_mode == RegistryMode::StakeGated {
            let have = self.ledger.staked_amount(&address);
            if have < self.params.minimum_stake {
                return Err(GovernanceError::NotEnoughStakedTokens {
                    have,
                    need: self.params.minimum_stake,
                });
            }
        }
        self.registry.insert(host, address)?;
        info!(host, %address, "attestor added");
        self.events.push(GovernanceEvent::AttestorAdded {
            host: host.to_string(),
            address,
        });
        Ok(())
    }

    pub fn remove_attestor(&mut self, caller: &Address, host: &str) -> Result<Address, GovernanceError> {
        self.access.ensure_owner(caller)?;
        let address = self.registry.remove(host)?;
        info!(host, %address, "attestor removed");
        self.events.push(GovernanceEvent::AttestorRemoved {
            host: host.to_string(),
            address,
        });
        Ok(address)
    }

    pub fn get_attestor(&self, host: &str) -> Result<Address, GovernanceError> {
        self.registry
            .get(host)
            .ok_or_else(|| GovernanceError::AttestorDoesNotExist(host.to_string()))
    }

    pub fn get_attestors(&self) -> (Vec<String>, Vec<Address>) {
        self.registry.hosts_and_addresses()
    }

    // ── Administration ──────────────────────────────────────────────────

    pub fn apply_param(
        &mut self,
        caller: &Address,
        change: ParamChange,
    ) -> Result<(), GovernanceError> {
        self.access.ensure_owner(caller)?;
        change.apply(&mut self.params)?;
        info!(param = change.name(), ?change, "parameter changed");
        self.events.push(GovernanceEvent::ParamChanged {
            param: change.name().to_string(),
        });
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), GovernanceError> {
        self.access.ensure_owner(caller)?;
        let previous = self.access.owner();
        self.access.set_owner(new_owner);
        info!(%previous, new = %new_owner, "ownership transferred");
        self.events.push(GovernanceEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Authorize `task_manager` to register rewards and slash attestors.
    pub fn set_task_manager(
        &mut self,
        caller: &Address,
        task_manager: Address,
    ) -> Result<(), GovernanceError> {
        self.access.ensure_owner(caller)?;
        self.access.set_task_manager(task_manager);
        info!(%task_manager, "task manager authorized");
        self.events.push(GovernanceEvent::TaskManagerSet { task_manager });
        Ok(())
    }
}
