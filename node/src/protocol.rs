//! The protocol node: one writer, staged commits, events after commit.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use attest_claims::Proof;
use attest_governance::{AttestorAccount, Governance, GovernanceEvent, ParamChange, Payout};
use attest_tasks::Task;
use attest_types::{Address, Amount, ChainClock, ProtocolParams, TaskId, Timestamp};
use attest_verification::{VerificationError, Verdict};
use tracing::{debug, info, warn};

use crate::config::NodeConfig;
use crate::event::{EventBus, ProtocolEvent};
use crate::metrics::ProtocolMetrics;
use crate::snapshot::StateSnapshot;
use crate::state::ProtocolState;
use crate::tracing_spans::{operation_span, task_span, verification_span};
use crate::NodeError;

/// The attestation protocol behind a single lock.
///
/// Every state-changing call runs against a copy of the state it touches
/// (the governance half alone for ledger, registry and admin calls, the whole
/// state for task and verification calls) and the copy replaces the live
/// state only when the call succeeds, so a call either commits all of its
/// effects or none. Calls are totally ordered by lock acquisition.
/// Events are published to the [`EventBus`] after the lock is released.
pub struct Protocol<C: ChainClock> {
    state: Mutex<ProtocolState>,
    clock: C,
    events: EventBus,
    metrics: ProtocolMetrics,
}

impl<C: ChainClock> Protocol<C> {
    /// Start from genesis with the owner and parameters in `config`.
    pub fn new(config: &NodeConfig, clock: C) -> Result<Self, NodeError> {
        let state = ProtocolState::genesis(config.owner, config.params.clone())?;
        info!(owner = %config.owner, "protocol initialised at genesis");
        Self::with_state(state, clock)
    }

    /// Resume from a snapshot.
    pub fn from_snapshot(snapshot: &StateSnapshot, clock: C) -> Result<Self, NodeError> {
        let state = snapshot.restore()?;
        info!(current_task = state.tasks.current_task(), "protocol restored from snapshot");
        Self::with_state(state, clock)
    }

    /// Resume from `config.snapshot_path` when that file exists, otherwise
    /// start from genesis.
    pub fn open(config: &NodeConfig, clock: C) -> Result<Self, NodeError> {
        match &config.snapshot_path {
            Some(path) if path.exists() => {
                let snapshot = StateSnapshot::read_from(path)?;
                let protocol = Self::from_snapshot(&snapshot, clock)?;
                let owner = protocol.owner()?;
                if owner != config.owner {
                    warn!(configured = %config.owner, %owner, "snapshot owner differs from config");
                }
                Ok(protocol)
            }
            _ => Self::new(config, clock),
        }
    }

    /// Write the committed state to `path`.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), NodeError> {
        let path = path.as_ref();
        self.snapshot()?.write_to(path)?;
        info!(path = %path.display(), "snapshot written");
        Ok(())
    }

    fn with_state(state: ProtocolState, clock: C) -> Result<Self, NodeError> {
        let metrics = ProtocolMetrics::new()?;
        metrics.observe(&state);
        Ok(Self {
            state: Mutex::new(state),
            clock,
            events: EventBus::new(),
            metrics,
        })
    }

    /// Register a listener for committed events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ProtocolEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn metrics(&self) -> &ProtocolMetrics {
        &self.metrics
    }

    pub fn snapshot(&self) -> Result<StateSnapshot, NodeError> {
        let state = self.lock()?;
        StateSnapshot::capture(&state)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProtocolState>, NodeError> {
        self.state.lock().map_err(|_| NodeError::StatePoisoned)
    }

    fn read<T>(&self, f: impl FnOnce(&ProtocolState) -> T) -> Result<T, NodeError> {
        let state = self.lock()?;
        Ok(f(&*state))
    }

    /// Run `op` against a staged copy; commit and publish on success.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut ProtocolState) -> Result<T, NodeError>,
    ) -> Result<T, NodeError> {
        let mut live = self.lock()?;
        let mut staged = live.clone();
        let out = op(&mut staged)?;
        let events = staged.drain_events();
        *live = staged;
        self.metrics.observe(&live);
        drop(live);

        self.publish(&events);
        Ok(out)
    }

    /// Like [`transact`](Self::transact), staging only the governance half.
    fn transact_governance<T>(
        &self,
        op: impl FnOnce(&mut Governance) -> Result<T, NodeError>,
    ) -> Result<T, NodeError> {
        let mut live = self.lock()?;
        let mut staged = live.governance.clone();
        let out = op(&mut staged)?;
        live.governance = staged;
        let events = live.drain_events();
        self.metrics.observe(&live);
        drop(live);

        self.publish(&events);
        Ok(out)
    }

    fn publish(&self, events: &[ProtocolEvent]) {
        for event in events {
            self.record(event);
            self.events.emit(event);
        }
    }

    fn record(&self, event: &ProtocolEvent) {
        match event {
            ProtocolEvent::TaskCreated { .. } => self.metrics.tasks_created.inc(),
            ProtocolEvent::Governance(GovernanceEvent::AttestorSlashed { .. }) => {
                self.metrics.attestors_slashed.inc()
            }
            _ => {}
        }
    }

    // ── Stake ledger ────────────────────────────────────────────────────

    pub fn stake(&self, caller: &Address, amount: Amount) -> Result<Amount, NodeError> {
        let _span = operation_span("stake", caller).entered();
        self.transact_governance(|g| Ok(g.stake(caller, amount)?))
    }

    pub fn delegate_stake(
        &self,
        caller: &Address,
        beneficiary: &Address,
        amount: Amount,
    ) -> Result<Amount, NodeError> {
        let _span = operation_span("delegate_stake", caller).entered();
        self.transact_governance(|g| Ok(g.delegate_stake(caller, beneficiary, amount)?))
    }

    /// Start unbonding at the current block.
    pub fn request_unstake(&self, caller: &Address) -> Result<(), NodeError> {
        let _span = operation_span("request_unstake", caller).entered();
        let now = self.clock.block_height();
        self.transact_governance(|g| Ok(g.request_unstake(caller, now)?))
    }

    pub fn unstake(&self, caller: &Address, payout: &mut dyn Payout) -> Result<Amount, NodeError> {
        let _span = operation_span("unstake", caller).entered();
        let now = self.clock.block_height();
        self.transact_governance(|g| Ok(g.unstake(caller, now, payout)?))
    }

    pub fn slash(&self, caller: &Address, amount: Amount) -> Result<(), NodeError> {
        let _span = operation_span("slash", caller).entered();
        self.transact_governance(|g| Ok(g.slash(caller, amount)?))
    }

    pub fn slash_attestor(
        &self,
        caller: &Address,
        attestor: &Address,
        amount: Amount,
    ) -> Result<Amount, NodeError> {
        let _span = operation_span("slash_attestor", caller).entered();
        self.transact_governance(|g| Ok(g.slash_attestor(caller, attestor, amount)?))
    }

    pub fn register_rewards(
        &self,
        caller: &Address,
        candidates: &[Address],
        cost: Amount,
    ) -> Result<Vec<(Address, Amount)>, NodeError> {
        let _span = operation_span("register_rewards", caller).entered();
        self.transact_governance(|g| Ok(g.register_rewards(caller, candidates, cost)?))
    }

    pub fn claim_rewards(
        &self,
        caller: &Address,
        payout: &mut dyn Payout,
    ) -> Result<Amount, NodeError> {
        let _span = operation_span("claim_rewards", caller).entered();
        self.transact_governance(|g| Ok(g.claim_rewards(caller, payout)?))
    }

    pub fn withdraw(&self, caller: &Address, payout: &mut dyn Payout) -> Result<Amount, NodeError> {
        let _span = operation_span("withdraw", caller).entered();
        self.transact_governance(|g| Ok(g.withdraw(caller, payout)?))
    }

    pub fn account(&self, address: &Address) -> Result<Option<AttestorAccount>, NodeError> {
        self.read(|s| s.governance.ledger().account(address).cloned())
    }

    pub fn staked_amount(&self, address: &Address) -> Result<Amount, NodeError> {
        self.read(|s| s.governance.ledger().staked_amount(address))
    }

    pub fn pending_reward(&self, address: &Address) -> Result<Amount, NodeError> {
        self.read(|s| s.governance.ledger().pending_reward(address))
    }

    pub fn total_staked(&self) -> Result<Amount, NodeError> {
        self.read(|s| s.governance.ledger().total_staked())
    }

    pub fn total_slashed(&self) -> Result<Amount, NodeError> {
        self.read(|s| s.governance.ledger().total_slashed())
    }

    /// Native value currently held by the ledger.
    pub fn ledger_balance(&self) -> Result<Amount, NodeError> {
        self.read(|s| s.governance.ledger().balance())
    }

    // ── Attestor registry ───────────────────────────────────────────────

    pub fn add_attestor(&self, caller: &Address, host: &str, address: Address) -> Result<(), NodeError> {
        let _span = operation_span("add_attestor", caller).entered();
        self.transact_governance(|g| Ok(g.add_attestor(caller, host, address)?))
    }

    pub fn remove_attestor(&self, caller: &Address, host: &str) -> Result<Address, NodeError> {
        let _span = operation_span("remove_attestor", caller).entered();
        self.transact_governance(|g| Ok(g.remove_attestor(caller, host)?))
    }

    pub fn get_attestor(&self, host: &str) -> Result<Address, NodeError> {
        self.read(|s| s.governance.get_attestor(host))?
            .map_err(NodeError::from)
    }

    /// Registered hosts and addresses as parallel sequences.
    pub fn get_attestors(&self) -> Result<(Vec<String>, Vec<Address>), NodeError> {
        self.read(|s| s.governance.get_attestors())
    }

    // ── Tasks ───────────────────────────────────────────────────────────

    pub fn create_new_task_request(
        &self,
        seed: [u8; 32],
        timestamp: Timestamp,
    ) -> Result<Task, NodeError> {
        let _span = task_span(&seed).entered();
        self.transact(|s| s.create_task(seed, timestamp))
    }

    /// Create a task stamped with the chain's current time.
    pub fn create_task_now(&self, seed: [u8; 32]) -> Result<Task, NodeError> {
        self.create_new_task_request(seed, self.clock.timestamp())
    }

    pub fn fetch_task(&self, id: TaskId) -> Result<Task, NodeError> {
        self.read(|s| s.tasks.fetch_task(id).cloned())?
            .map_err(NodeError::from)
    }

    pub fn current_task(&self) -> Result<TaskId, NodeError> {
        self.read(|s| s.tasks.current_task())
    }

    pub fn consensus_reached(&self, id: TaskId) -> Result<bool, NodeError> {
        self.read(|s| s.tasks.consensus_reached(id))?
            .map_err(NodeError::from)
    }

    pub fn set_required_attestors(&self, caller: &Address, count: u32) -> Result<(), NodeError> {
        let _span = operation_span("set_required_attestors", caller).entered();
        self.transact(|s| s.set_required_attestors(caller, count))
    }

    pub fn set_minimum_attestors(&self, caller: &Address, count: u32) -> Result<(), NodeError> {
        let _span = operation_span("set_minimum_attestors", caller).entered();
        self.transact(|s| s.set_minimum_attestors(caller, count))
    }

    // ── Verification ────────────────────────────────────────────────────

    pub fn verify_proof(
        &self,
        proof: &Proof,
        task_id: TaskId,
        payment: Amount,
    ) -> Result<Verdict, NodeError> {
        self.verify_proofs(std::slice::from_ref(proof), task_id, payment)
    }

    /// Verify `proofs` against task `task_id`, paying `payment`.
    ///
    /// When consensus fails the call returns `ConsensusFailed` and the task
    /// and payment are left untouched, but fraud penalties applied on the
    /// way are committed.
    pub fn verify_proofs(
        &self,
        proofs: &[Proof],
        task_id: TaskId,
        payment: Amount,
    ) -> Result<Verdict, NodeError> {
        let _span = verification_span(task_id, proofs.len()).entered();
        let result = self
            .transact(|s| s.verify(proofs, task_id, payment))
            .and_then(|verdict| verdict.into_result().map_err(NodeError::from));
        match &result {
            Ok(_) => self.metrics.verifications_accepted.inc(),
            Err(e) => {
                debug!(task_id, error = %e, "verification rejected");
                self.metrics.verifications_rejected.inc();
            }
        }
        result
    }

    /// Decode proofs from their JSON wire form and verify them.
    pub fn verify_proofs_json(
        &self,
        json: &str,
        task_id: TaskId,
        payment: Amount,
    ) -> Result<Verdict, NodeError> {
        let proofs: Vec<Proof> = serde_json::from_str(json)
            .map_err(|e| VerificationError::Malformed(e.to_string()))?;
        self.verify_proofs(&proofs, task_id, payment)
    }

    // ── Administration ──────────────────────────────────────────────────

    pub fn set_param(&self, caller: &Address, change: ParamChange) -> Result<(), NodeError> {
        let _span = operation_span("set_param", caller).entered();
        self.transact_governance(|g| Ok(g.apply_param(caller, change)?))
    }

    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> Result<(), NodeError> {
        let _span = operation_span("transfer_ownership", caller).entered();
        self.transact_governance(|g| Ok(g.transfer_ownership(caller, new_owner)?))
    }

    pub fn owner(&self) -> Result<Address, NodeError> {
        self.read(|s| s.governance.access().owner())
    }

    pub fn params(&self) -> Result<ProtocolParams, NodeError> {
        self.read(ProtocolState::params)
    }
}
