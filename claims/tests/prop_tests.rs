use proptest::prelude::*;

use attest_claims::{recover_signer, sign_claim, ClaimInfo, CompleteClaimData, Proof, SignedClaim};
use attest_crypto::{derive_address, keypair_from_seed};
use attest_types::Address;

fn arb_info() -> impl Strategy<Value = ClaimInfo> {
    (".{0,16}", ".{0,64}", ".{0,32}").prop_map(|(provider, parameters, context)| ClaimInfo {
        provider,
        parameters,
        context,
    })
}

proptest! {
    /// Any proof built from its own body passes the identifier check and
    /// survives the JSON wire form.
    #[test]
    fn self_built_proofs_check_out(
        info in arb_info(),
        owner in prop::array::uniform20(0u8..),
        timestamp_s in any::<u64>(),
        epoch in any::<u32>(),
    ) {
        let claim = CompleteClaimData::for_info(&info, Address::new(owner), timestamp_s, epoch);
        let proof = Proof {
            claim_info: info,
            signed_claim: SignedClaim { claim, signatures: vec![] },
        };
        prop_assert!(proof.check_identifier().is_ok());
        let decoded = Proof::from_json(&proof.to_json().unwrap()).unwrap();
        prop_assert!(decoded.check_identifier().is_ok());
    }

    /// Changing the timestamp after signing breaks both the identifier and
    /// the signature.
    #[test]
    fn shifted_timestamp_is_detected(
        info in arb_info(),
        seed in prop::array::uniform32(0u8..),
        timestamp_s in 0u64..u64::MAX,
    ) {
        let kp = keypair_from_seed(&seed);
        let claim = CompleteClaimData::for_info(&info, Address::new([1u8; 20]), timestamp_s, 1);
        let sig = sign_claim(&claim, &kp);
        prop_assert_eq!(recover_signer(&claim, &sig), Some(derive_address(&kp.public)));

        let mut shifted = claim.clone();
        shifted.timestamp_s += 1;
        prop_assert_eq!(recover_signer(&shifted, &sig), None);

        let proof = Proof {
            claim_info: info,
            signed_claim: SignedClaim { claim: shifted, signatures: vec![sig] },
        };
        prop_assert!(proof.check_identifier().is_err());
    }
}
