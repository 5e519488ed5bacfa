//! The stake ledger: bonded stake, slashing, pending rewards and the native
//! value the ledger holds.
//!
//! The ledger does no access control; [`Governance`](crate::Governance) checks
//! callers before reaching in here. Every value-moving method follows the same
//! order: validate, update the books, call the [`Payout`] sink, and restore the
//! books if the sink fails.

use crate::error::GovernanceError;
use crate::payout::Payout;
use attest_types::{Address, Amount, BlockHeight};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Per-attestor stake state. Accounts are created on first stake and never
/// removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestorAccount {
    pub address: Address,
    pub staked_amount: Amount,
    /// Block at which unbonding started, if it has.
    pub unstake_request_block: Option<BlockHeight>,
    pub pending_reward: Amount,
}

impl AttestorAccount {
    fn new(address: Address) -> Self {
        Self {
            address,
            staked_amount: Amount::ZERO,
            unstake_request_block: None,
            pending_reward: Amount::ZERO,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeLedger {
    accounts: BTreeMap<Address, AttestorAccount>,
    total_staked: Amount,
    total_slashed: Amount,
    /// Native value held by the ledger.
    balance: Amount,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, address: &Address) -> Option<&AttestorAccount> {
        self.accounts.get(address)
    }

    /// All accounts in address order.
    pub fn accounts(&self) -> impl Iterator<Item = &AttestorAccount> {
        self.accounts.values()
    }

    pub fn staked_amount(&self, address: &Address) -> Amount {
        self.accounts
            .get(address)
            .map(|a| a.staked_amount)
            .unwrap_or(Amount::ZERO)
    }

    pub fn pending_reward(&self, address: &Address) -> Amount {
        self.accounts
            .get(address)
            .map(|a| a.pending_reward)
            .unwrap_or(Amount::ZERO)
    }

    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    pub fn total_slashed(&self) -> Amount {
        self.total_slashed
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// `total_staked` equals the sum of every account's stake.
    pub fn is_conserved(&self) -> bool {
        let sum = self
            .accounts
            .values()
            .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a.staked_amount));
        sum == Some(self.total_staked)
    }

    /// Credit `amount` of stake to `address`, backed by an equal payment into
    /// the ledger. Returns the account's new stake.
    pub fn credit_stake(
        &mut self,
        address: Address,
        amount: Amount,
    ) -> Result<Amount, GovernanceError> {
        if amount.is_zero() {
            return Err(GovernanceError::ZeroAmount);
        }
        let current = self.staked_amount(&address);
        let staked = current.checked_add(amount).ok_or(GovernanceError::Overflow)?;
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;

        self.accounts
            .entry(address)
            .or_insert_with(|| AttestorAccount::new(address))
            .staked_amount = staked;
        self.total_staked = total;
        self.balance = balance;
        Ok(staked)
    }

    /// Start unbonding the full stake of `address` at block `now`.
    pub fn request_unstake(
        &mut self,
        address: &Address,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        let account = self
            .accounts
            .get_mut(address)
            .filter(|a| !a.staked_amount.is_zero())
            .ok_or(GovernanceError::NoStakedTokens)?;
        if let Some(requested) = account.unstake_request_block {
            return Err(GovernanceError::UnstakeAlreadyRequested(requested));
        }
        account.unstake_request_block = Some(now);
        Ok(())
    }

    /// Pay back the whole stake of `address` once `unbonding_period` blocks
    /// have passed since the request. Returns the amount paid.
    pub fn unstake(
        &mut self,
        address: &Address,
        now: BlockHeight,
        unbonding_period: u64,
        payout: &mut dyn Payout,
    ) -> Result<Amount, GovernanceError> {
        let account = self
            .accounts
            .get(address)
            .ok_or(GovernanceError::UnstakeNotRequested)?;
        let requested = account
            .unstake_request_block
            .ok_or(GovernanceError::UnstakeNotRequested)?;
        let elapsed = now.blocks_since(requested);
        if elapsed < unbonding_period {
            return Err(GovernanceError::UnbondingPeriodNotPassed {
                remaining: unbonding_period - elapsed,
            });
        }

        let amount = account.staked_amount;
        self.ensure_held(amount)?;

        let before = account.clone();
        self.set_account(AttestorAccount {
            staked_amount: Amount::ZERO,
            unstake_request_block: None,
            ..before.clone()
        });
        self.total_staked = self.total_staked.saturating_sub(amount);

        if let Err(e) = self.transfer_out(address, amount, payout) {
            self.set_account(before);
            self.total_staked = self.total_staked + amount;
            return Err(e);
        }
        Ok(amount)
    }

    /// Slash `amount` from the global stake pool.
    ///
    /// The amount is spread pro-rata over every staked account (floor shares,
    /// then one raw unit at a time in address order until the remainder is
    /// used up) so the per-account stakes keep summing to `total_staked`.
    /// Returns the per-account deductions.
    pub fn slash_total(
        &mut self,
        amount: Amount,
    ) -> Result<Vec<(Address, Amount)>, GovernanceError> {
        if amount > self.total_staked {
            return Err(GovernanceError::SlashExceedsTotalStake {
                amount,
                total_staked: self.total_staked,
            });
        }
        let total_slashed = self
            .total_slashed
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        if amount.is_zero() {
            return Ok(Vec::new());
        }

        let total = self.total_staked.raw();
        let mut shares = Vec::new();
        for account in self.accounts.values() {
            if account.staked_amount.is_zero() {
                continue;
            }
            let share = amount
                .mul_div_floor(account.staked_amount.raw(), total)
                .ok_or(GovernanceError::Overflow)?;
            shares.push((account.address, account.staked_amount, share));
        }

        let mut remainder = amount.raw() - shares.iter().map(|(_, _, s)| s.raw()).sum::<u128>();
        for (_, staked, share) in shares.iter_mut() {
            if remainder == 0 {
                break;
            }
            if *share < *staked {
                *share = *share + Amount::new(1);
                remainder -= 1;
            }
        }

        let mut deductions = Vec::with_capacity(shares.len());
        for (address, staked, share) in shares {
            if share.is_zero() {
                continue;
            }
            if let Some(account) = self.accounts.get_mut(&address) {
                account.staked_amount = staked - share;
            }
            deductions.push((address, share));
        }
        self.total_staked = self.total_staked - amount;
        self.total_slashed = total_slashed;
        Ok(deductions)
    }

    /// Slash `amount` from one attestor. Returns the attestor's remaining stake.
    pub fn slash_account(
        &mut self,
        address: &Address,
        amount: Amount,
    ) -> Result<Amount, GovernanceError> {
        let staked = self.staked_amount(address);
        if amount > staked {
            return Err(GovernanceError::SlashExceedsAttestorStake {
                attestor: *address,
                amount,
                staked,
            });
        }
        let total_slashed = self
            .total_slashed
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        let remaining = staked - amount;
        if let Some(account) = self.accounts.get_mut(address) {
            account.staked_amount = remaining;
        }
        self.total_staked = self.total_staked - amount;
        self.total_slashed = total_slashed;
        Ok(remaining)
    }

    /// Distribute `cost` as pending rewards over the valid `candidates`,
    /// proportionally to their stake.
    ///
    /// A candidate is valid when `is_registered` accepts it and it has stake;
    /// repeated candidates count once. Shares are floored, so they never sum
    /// above `cost`. An empty ledger makes this a no-op.
    pub fn register_rewards(
        &mut self,
        candidates: &[Address],
        cost: Amount,
        is_registered: impl Fn(&Address) -> bool,
    ) -> Result<Vec<(Address, Amount)>, GovernanceError> {
        if self.total_staked.is_zero() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let valid: Vec<(Address, Amount)> = candidates
            .iter()
            .filter(|c| seen.insert(**c))
            .filter(|c| is_registered(*c))
            .map(|c| (*c, self.staked_amount(c)))
            .filter(|(_, stake)| !stake.is_zero())
            .collect();
        if valid.is_empty() {
            return Err(GovernanceError::NoValidAttestorsProvided);
        }

        let pool = valid
            .iter()
            .try_fold(Amount::ZERO, |acc, (_, stake)| acc.checked_add(*stake))
            .ok_or(GovernanceError::Overflow)?;

        let mut rewards = Vec::with_capacity(valid.len());
        for (address, stake) in valid {
            let share = cost
                .mul_div_floor(stake.raw(), pool.raw())
                .ok_or(GovernanceError::Overflow)?;
            let pending = self
                .pending_reward(&address)
                .checked_add(share)
                .ok_or(GovernanceError::Overflow)?;
            rewards.push((address, share, pending));
        }

        for (address, _, pending) in &rewards {
            if let Some(account) = self.accounts.get_mut(address) {
                account.pending_reward = *pending;
            }
        }
        Ok(rewards.into_iter().map(|(a, share, _)| (a, share)).collect())
    }

    /// Pay out the full pending reward of `address`.
    pub fn claim_rewards(
        &mut self,
        address: &Address,
        payout: &mut dyn Payout,
    ) -> Result<Amount, GovernanceError> {
        let amount = self.pending_reward(address);
        if amount.is_zero() {
            return Err(GovernanceError::NoRewardsToClaim);
        }
        self.ensure_held(amount)?;

        if let Some(account) = self.accounts.get_mut(address) {
            account.pending_reward = Amount::ZERO;
        }
        if let Err(e) = self.transfer_out(address, amount, payout) {
            if let Some(account) = self.accounts.get_mut(address) {
                account.pending_reward = amount;
            }
            return Err(e);
        }
        Ok(amount)
    }

    /// Pay the ledger's entire held balance to `to`.
    pub fn withdraw_all(
        &mut self,
        to: &Address,
        payout: &mut dyn Payout,
    ) -> Result<Amount, GovernanceError> {
        let amount = self.balance;
        if amount.is_zero() {
            return Ok(amount);
        }
        self.transfer_out(to, amount, payout)?;
        Ok(amount)
    }

    /// Record native value paid into the ledger alongside a call.
    pub fn receive_payment(&mut self, amount: Amount) -> Result<(), GovernanceError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        Ok(())
    }

    fn set_account(&mut self, account: AttestorAccount) {
        self.accounts.insert(account.address, account);
    }

    fn ensure_held(&self, needed: Amount) -> Result<(), GovernanceError> {
        if needed > self.balance {
            return Err(GovernanceError::InsufficientLedgerBalance {
                needed,
                held: self.balance,
            });
        }
        Ok(())
    }

    /// Debit the held balance, then hand the value to the sink. The debit is
    /// undone if the sink fails.
    fn transfer_out(
        &mut self,
        to: &Address,
        amount: Amount,
        payout: &mut dyn Payout,
    ) -> Result<(), GovernanceError> {
        self.ensure_held(amount)?;
        if amount.is_zero() {
            return Ok(());
        }
        self.balance = self.balance - amount;
        payout.pay(to, amount).map_err(|e| {
            self.balance = self.balance + amount;
            GovernanceError::PayoutFailed {
                to: *to,
                reason: e.0,
            }
        })
    }
}
