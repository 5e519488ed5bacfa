//! The complete protocol state and its transitions.
//!
//! `ProtocolState` knows nothing about locking or publishing. Every method
//! either fully applies or returns an error, possibly leaving `self` partly
//! modified; [`Protocol`](crate::Protocol) runs each method against a staged
//! copy and only keeps the copy on success.

use attest_claims::Proof;
use attest_governance::Governance;
use attest_tasks::{ConsensusState, Task, TaskManager};
use attest_types::{Address, Amount, ProtocolParams, TaskId, Timestamp};
use attest_verification::Verdict;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::event::ProtocolEvent;
use crate::NodeError;

/// The principal the node acts as when the task manager calls into the
/// stake ledger (reward registration and fraud slashing).
pub const TASK_MANAGER: Address = Address::new(*b"attest/task-manager\0");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolState {
    pub governance: Governance,
    pub tasks: TaskManager,
    #[serde(skip)]
    events: Vec<ProtocolEvent>,
}

impl ProtocolState {
    pub fn genesis(owner: Address, params: ProtocolParams) -> Result<Self, NodeError> {
        params
            .validate()
            .map_err(|e| NodeError::Config(e.to_string()))?;
        let mut governance = Governance::new(owner, params.staking);
        governance.set_task_manager(&owner, TASK_MANAGER)?;
        governance.drain_events();
        Ok(Self {
            governance,
            tasks: TaskManager::new(params.tasks)?,
            events: Vec::new(),
        })
    }

    /// Current parameters of both halves of the protocol.
    pub fn params(&self) -> ProtocolParams {
        ProtocolParams {
            staking: self.governance.params().clone(),
            tasks: self.tasks.params().clone(),
        }
    }

    /// Check invariants that deserialization alone does not enforce.
    pub fn check_integrity(&self) -> Result<(), NodeError> {
        self.params()
            .validate()
            .map_err(|e| NodeError::Snapshot(e.to_string()))?;
        self.tasks
            .check_integrity()
            .map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    /// Events produced since the last drain, governance events first.
    pub fn drain_events(&mut self) -> Vec<ProtocolEvent> {
        let mut events: Vec<ProtocolEvent> = self
            .governance
            .drain_events()
            .into_iter()
            .map(ProtocolEvent::Governance)
            .collect();
        events.append(&mut self.events);
        events
    }

    pub fn set_required_attestors(&mut self, caller: &Address, count: u32) -> Result<(), NodeError> {
        self.governance.access().ensure_owner(caller)?;
        self.tasks.set_required_attestors(count)?;
        Ok(())
    }

    pub fn set_minimum_attestors(&mut self, caller: &Address, count: u32) -> Result<(), NodeError> {
        self.governance.access().ensure_owner(caller)?;
        self.tasks.set_minimum_attestors(count)?;
        Ok(())
    }

    /// Create a task whose committee is drawn from the current registry.
    pub fn create_task(&mut self, seed: [u8; 32], timestamp: Timestamp) -> Result<Task, NodeError> {
        let attestors = self.governance.registry().addresses();
        let task = self
            .tasks
            .create_new_task_request(seed, timestamp, &attestors)?
            .clone();
        self.events.push(ProtocolEvent::TaskCreated {
            task_id: task.id,
            committee: task.committee.clone(),
        });
        Ok(task)
    }

    /// Check `proofs` against task `task_id` and apply the outcome.
    ///
    /// With slashing enabled, committee members that signed a conflicting
    /// claim are penalized whatever the outcome, at most once per task. On
    /// consensus the task is finalized, `payment` is taken into the ledger
    /// and the verification cost is split over the endorsing committee
    /// members. Without consensus
    /// only the penalties are applied and the returned verdict reports the
    /// failure; the caller turns it into an error after committing.
    pub fn verify(
        &mut self,
        proofs: &[Proof],
        task_id: TaskId,
        payment: Amount,
    ) -> Result<Verdict, NodeError> {
        let cost = self.governance.params().verification_cost;
        let task = self.tasks.fetch_task(task_id)?;
        let verdict = attest_verification::verify(task, proofs, payment, cost)?;

        if self.governance.params().slashing_enabled {
            for dissenter in &verdict.dissenters {
                if !self.tasks.record_penalty(task_id, dissenter)? {
                    debug!(task_id, attestor = %dissenter, "already penalized for this task");
                    continue;
                }
                let penalty = self.governance.slash_for_fraud(&TASK_MANAGER, dissenter)?;
                warn!(task_id, attestor = %dissenter, %penalty, "fraudulent signature penalized");
            }
        }

        if !verdict.consensus_reached() {
            info!(
                task_id,
                valid = verdict.valid_count,
                committee_size = verdict.committee_size,
                "consensus not reached"
            );
            return Ok(verdict);
        }

        self.tasks.finalize(task_id, ConsensusState::Reached)?;
        self.governance.receive_payment(payment)?;
        self.governance
            .register_rewards(&TASK_MANAGER, &verdict.endorsers, cost.min(payment))?;
        if let Some(identifier) = verdict.identifier {
            self.events.push(ProtocolEvent::TaskVerified {
                task_id,
                identifier,
                endorsers: verdict.endorsers.clone(),
            });
        }
        info!(task_id, valid = verdict.valid_count, "task verified");
        Ok(verdict)
    }
}
