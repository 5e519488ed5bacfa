//! Proof verification against a task's committee.

use crate::error::VerificationError;
use crate::tally::Tally;
use attest_claims::{recover_signer, Proof};
use attest_tasks::Task;
use attest_types::{Address, Amount, ClaimId, TaskId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The result of checking a set of proofs against a task.
///
/// Producing a verdict does not touch any state; the caller decides how to
/// apply it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub task_id: TaskId,
    /// The identifier with a strict plurality of committee signatures, if any.
    pub identifier: Option<ClaimId>,
    /// Committee members that signed `identifier`, in signing order.
    pub endorsers: Vec<Address>,
    /// Committee members that validly signed an identifier other than
    /// `identifier`. Empty when there is no strict plurality.
    pub dissenters: Vec<Address>,
    /// Committee signatures on the best-supported identifier.
    pub valid_count: usize,
    pub committee_size: usize,
}

impl Verdict {
    /// Strict majority of the committee.
    pub fn consensus_reached(&self) -> bool {
        self.valid_count * 2 > self.committee_size
    }

    pub fn into_result(self) -> Result<Self, VerificationError> {
        if self.consensus_reached() {
            Ok(self)
        } else {
            Err(VerificationError::ConsensusFailed {
                valid: self.valid_count,
                committee_size: self.committee_size,
            })
        }
    }
}

/// Check that `task` can still be verified for `payment`.
pub fn check_admission(task: &Task, payment: Amount, cost: Amount) -> Result<(), VerificationError> {
    if task.processed {
        return Err(VerificationError::TaskAlreadyProcessed(task.id));
    }
    if payment < cost {
        return Err(VerificationError::VerificationUnderpriced { payment, cost });
    }
    Ok(())
}

/// Evaluate `proofs` against the committee of `task`.
///
/// Fails on the first structural problem: an empty proof set or signature
/// list, an identifier that does not match its claim body, or two signatures
/// that recover to the same address. Signatures that do not verify are
/// ignored, as are signers outside the committee.
pub fn evaluate(task: &Task, proofs: &[Proof]) -> Result<Verdict, VerificationError> {
    if proofs.is_empty() {
        return Err(VerificationError::NoSignatures);
    }
    for proof in proofs {
        if proof.signed_claim.signatures.is_empty() {
            return Err(VerificationError::NoSignatures);
        }
        proof.check_identifier()?;
    }

    let mut seen = HashSet::new();
    let mut tally = Tally::new();
    for proof in proofs {
        let claim = &proof.signed_claim.claim;
        for signature in &proof.signed_claim.signatures {
            let Some(signer) = recover_signer(claim, signature) else {
                debug!(task_id = task.id, signer = ?signature.signer, "signature does not verify");
                continue;
            };
            if !seen.insert(signer) {
                warn!(task_id = task.id, %signer, "duplicate signature");
                return Err(VerificationError::DuplicateSignaturesFound(signer));
            }
            if task.is_committee_member(&signer) {
                tally.record(claim.identifier, signer);
            } else {
                debug!(task_id = task.id, %signer, "signer outside committee");
            }
        }
    }

    let (identifier, endorsers, dissenters) = match tally.leader() {
        Some((id, signers)) => (Some(id), signers.to_vec(), tally.dissenters(&id)),
        None => (None, Vec::new(), Vec::new()),
    };
    Ok(Verdict {
        task_id: task.id,
        identifier,
        endorsers,
        dissenters,
        valid_count: tally.top_count(),
        committee_size: task.committee_size(),
    })
}

/// Admission checks followed by evaluation.
pub fn verify(
    task: &Task,
    proofs: &[Proof],
    payment: Amount,
    cost: Amount,
) -> Result<Verdict, VerificationError> {
    check_admission(task, payment, cost)?;
    evaluate(task, proofs)
}
