#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use attest_claims::{sign_claim, ClaimInfo, CompleteClaimData, Proof, SignedClaim};
use attest_crypto::{derive_address, keypair_from_seed};
use attest_tasks::{ConsensusState, Task};
use attest_types::{Address, KeyPair, Timestamp};

#[derive(Debug, Arbitrary)]
struct Submission {
    committee_size: u8,
    proofs: Vec<FuzzProof>,
}

#[derive(Debug, Arbitrary)]
struct FuzzProof {
    context: String,
    /// Indices into the key set; values past the committee sign as outsiders.
    signers: Vec<u8>,
    tamper: bool,
}

// Evaluating any mix of honest, conflicting, duplicated and tampered proofs
// must never panic, and a reached consensus must hold a strict majority.
fuzz_target!(|input: Submission| {
    let size = usize::from(input.committee_size % 8) + 1;
    let keys: Vec<KeyPair> = (0..16u8).map(|i| keypair_from_seed(&[i + 1; 32])).collect();
    let task = Task {
        id: 2,
        seed: [0; 32],
        timestamp_start: Timestamp::new(0),
        timestamp_end: Timestamp::new(1_800),
        committee: keys[..size].iter().map(|k| derive_address(&k.public)).collect(),
        minimum_attestors_for_claim_creation: 1,
        consensus: ConsensusState::Pending,
        processed: false,
        penalized: Vec::new(),
    };

    let proofs: Vec<Proof> = input
        .proofs
        .iter()
        .take(8)
        .map(|p| {
            let mut info = ClaimInfo {
                provider: "http".into(),
                parameters: "{}".into(),
                context: p.context.clone(),
            };
            let claim = CompleteClaimData::for_info(&info, Address::new([7; 20]), 1, 1);
            let signatures = p
                .signers
                .iter()
                .take(16)
                .map(|i| sign_claim(&claim, &keys[usize::from(*i) % keys.len()]))
                .collect();
            if p.tamper {
                info.context.push('!');
            }
            Proof {
                claim_info: info,
                signed_claim: SignedClaim { claim, signatures },
            }
        })
        .collect();

    if let Ok(verdict) = attest_verification::evaluate(&task, &proofs) {
        assert!(verdict.valid_count <= size);
        if verdict.identifier.is_some() {
            assert_eq!(verdict.endorsers.len(), verdict.valid_count);
        }
        if verdict.consensus_reached() {
            assert!(verdict.valid_count * 2 > size);
            assert!(verdict.identifier.is_some());
        }
    }
});
