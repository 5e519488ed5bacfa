use proptest::prelude::*;

use attest_claims::{sign_claim, ClaimInfo, CompleteClaimData, Proof, SignedClaim};
use attest_crypto::{derive_address, keypair_from_seed};
use attest_tasks::{ConsensusState, Task};
use attest_types::{Address, KeyPair, Timestamp};
use attest_verification::{evaluate, VerificationError};

fn committee_task(keys: &[KeyPair]) -> Task {
    Task {
        id: 2,
        seed: [0; 32],
        timestamp_start: Timestamp::new(0),
        timestamp_end: Timestamp::new(1_800),
        committee: keys.iter().map(|k| derive_address(&k.public)).collect(),
        minimum_attestors_for_claim_creation: 1,
        consensus: ConsensusState::Pending,
        processed: false,
        penalized: Vec::new(),
    }
}

fn signed_proof(signers: &[&KeyPair]) -> Proof {
    let info = ClaimInfo {
        provider: "http".into(),
        parameters: r#"{"url":"https://example.com"}"#.into(),
        context: String::new(),
    };
    let claim = CompleteClaimData::for_info(&info, Address::new([3; 20]), 1_738_255_480, 1);
    let signatures = signers.iter().map(|k| sign_claim(&claim, k)).collect();
    Proof {
        claim_info: info,
        signed_claim: SignedClaim { claim, signatures },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Consensus holds exactly when more than half the committee signs.
    #[test]
    fn majority_boundary(size in 1usize..8, signing in 1usize..8) {
        let signing = signing.min(size);
        let keys: Vec<KeyPair> = (0..size).map(|i| keypair_from_seed(&[i as u8 + 1; 32])).collect();
        let task = committee_task(&keys);
        let signers: Vec<&KeyPair> = keys.iter().take(signing).collect();

        let verdict = evaluate(&task, &[signed_proof(&signers)]).unwrap();
        prop_assert_eq!(verdict.valid_count, signing);
        prop_assert_eq!(verdict.consensus_reached(), signing * 2 > size);
    }

    /// A repeated signer rejects the whole call, wherever it appears.
    #[test]
    fn duplicates_always_reject(size in 1usize..6, dup in 0usize..6, at in 0usize..7) {
        let dup = dup % size;
        let keys: Vec<KeyPair> = (0..size).map(|i| keypair_from_seed(&[i as u8 + 1; 32])).collect();
        let task = committee_task(&keys);
        let mut signers: Vec<&KeyPair> = keys.iter().collect();
        let at = at.min(signers.len());
        signers.insert(at, &keys[dup]);

        let result = evaluate(&task, &[signed_proof(&signers)]);
        prop_assert_eq!(
            result,
            Err(VerificationError::DuplicateSignaturesFound(derive_address(&keys[dup].public)))
        );
    }
}
