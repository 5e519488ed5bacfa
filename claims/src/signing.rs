//! Canonical signing payload and signer recovery.

use crate::claim::{ClaimSignature, CompleteClaimData};
use attest_crypto::{derive_address, sign_message, verify_signature};
use attest_types::{Address, KeyPair};

/// The exact bytes an attestor signs for a claim:
/// `identifier \n owner \n timestamp_s \n epoch`, with the identifier and owner
/// as `0x`-prefixed lowercase hex and the integers in decimal.
pub fn serialize_for_signing(claim: &CompleteClaimData) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        claim.identifier, claim.owner, claim.timestamp_s, claim.epoch
    )
}

/// Sign a claim with an attestor key pair.
pub fn sign_claim(claim: &CompleteClaimData, keypair: &KeyPair) -> ClaimSignature {
    let payload = serialize_for_signing(claim);
    ClaimSignature {
        signer: keypair.public,
        signature: sign_message(payload.as_bytes(), &keypair.private),
    }
}

/// Recover the address that produced `signature` over `claim`.
///
/// Returns `None` when the signature does not verify under its declared key.
pub fn recover_signer(claim: &CompleteClaimData, signature: &ClaimSignature) -> Option<Address> {
    let payload = serialize_for_signing(claim);
    verify_signature(payload.as_bytes(), &signature.signature, &signature.signer)
        .then(|| derive_address(&signature.signer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimInfo;
    use attest_crypto::keypair_from_seed;
    use attest_types::Signature;

    fn claim() -> CompleteClaimData {
        let info = ClaimInfo {
            provider: "http".into(),
            parameters: "{}".into(),
            context: String::new(),
        };
        CompleteClaimData::for_info(&info, Address::new([0x2e; 20]), 1_738_255_480, 1)
    }

    #[test]
    fn payload_layout() {
        let c = claim();
        let payload = serialize_for_signing(&c);
        let lines: Vec<&str> = payload.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], c.identifier.to_string());
        assert_eq!(lines[1], c.owner.to_string());
        assert_eq!(lines[2], "1738255480");
        assert_eq!(lines[3], "1");
    }

    #[test]
    fn recovers_signer_address() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let c = claim();
        let sig = sign_claim(&c, &kp);
        assert_eq!(recover_signer(&c, &sig), Some(derive_address(&kp.public)));
    }

    #[test]
    fn signature_over_other_claim_does_not_recover() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let c = claim();
        let mut other = c.clone();
        other.epoch = 2;
        let sig = sign_claim(&other, &kp);
        assert_eq!(recover_signer(&c, &sig), None);
    }

    #[test]
    fn garbage_signature_does_not_recover() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let forged = ClaimSignature {
            signer: kp.public,
            signature: Signature([0x11; 64]),
        };
        assert_eq!(recover_signer(&claim(), &forged), None);
    }
}
