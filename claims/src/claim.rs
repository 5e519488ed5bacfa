//! Claim and proof data types.
//!
//! Field names serialize in camelCase so proofs emitted by external proof
//! producers as JSON decode without a translation layer.

use crate::error::ClaimError;
use crate::identifier::compute_identifier;
use attest_types::{Address, ClaimId, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// The provider-facing body of a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimInfo {
    /// Provider name, e.g. `"http"`.
    pub provider: String,
    /// Provider parameters, typically canonical JSON.
    pub parameters: String,
    /// Free-form context attached by the claim owner.
    pub context: String,
}

/// Ledger-facing claim data: the identifier plus the fields signed alongside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteClaimData {
    pub identifier: ClaimId,
    pub owner: Address,
    pub timestamp_s: u64,
    pub epoch: u32,
}

impl CompleteClaimData {
    /// Build claim data whose identifier is derived from `info`.
    pub fn for_info(info: &ClaimInfo, owner: Address, timestamp_s: u64, epoch: u32) -> Self {
        Self {
            identifier: compute_identifier(info, &owner, timestamp_s, epoch),
            owner,
            timestamp_s,
            epoch,
        }
    }
}

/// One attestor signature over a claim's canonical serialization.
///
/// Ed25519 signatures do not support public-key recovery, so the signer's key
/// travels with the signature and is checked during recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSignature {
    pub signer: PublicKey,
    pub signature: Signature,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedClaim {
    pub claim: CompleteClaimData,
    pub signatures: Vec<ClaimSignature>,
}

/// A claim body plus its signed claim data, as submitted for verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    pub claim_info: ClaimInfo,
    pub signed_claim: SignedClaim,
}

impl Proof {
    /// The identifier the proof declares for its claim.
    pub fn declared_identifier(&self) -> ClaimId {
        self.signed_claim.claim.identifier
    }

    /// Recompute the claim identifier from the proof body.
    pub fn computed_identifier(&self) -> ClaimId {
        let claim = &self.signed_claim.claim;
        compute_identifier(&self.claim_info, &claim.owner, claim.timestamp_s, claim.epoch)
    }

    /// Check that the declared identifier matches the claim body.
    pub fn check_identifier(&self) -> Result<(), ClaimError> {
        let declared = self.declared_identifier();
        let computed = self.computed_identifier();
        if declared != computed {
            return Err(ClaimError::IdentifierMismatch { declared, computed });
        }
        Ok(())
    }

    /// Decode a proof from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, ClaimError> {
        serde_json::from_str(json).map_err(|e| ClaimError::Malformed(e.to_string()))
    }

    /// Encode the proof in its JSON wire form.
    pub fn to_json(&self) -> Result<String, ClaimError> {
        serde_json::to_string(self).map_err(|e| ClaimError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_claim() -> ClaimInfo {
        ClaimInfo {
            provider: "http".into(),
            parameters: r#"{"method":"GET","url":"https://github.com/settings/profile"}"#.into(),
            context: r#"{"contextMessage":"for acmecorp.com on 1st january"}"#.into(),
        }
    }

    fn proof() -> Proof {
        let info = github_claim();
        let owner: Address = "0x2edddad5144aa9ab7e70c7c9c03c5fe5741be5cb".parse().unwrap();
        Proof {
            signed_claim: SignedClaim {
                claim: CompleteClaimData::for_info(&info, owner, 1_738_255_480, 1),
                signatures: vec![],
            },
            claim_info: info,
        }
    }

    #[test]
    fn derived_identifier_checks_out() {
        assert!(proof().check_identifier().is_ok());
    }

    #[test]
    fn tampered_body_is_detected() {
        let mut p = proof();
        p.claim_info.context.push(' ');
        assert!(matches!(
            p.check_identifier(),
            Err(ClaimError::IdentifierMismatch { .. })
        ));
    }

    #[test]
    fn tampered_owner_is_detected() {
        let mut p = proof();
        p.signed_claim.claim.owner = Address::new([9u8; 20]);
        assert!(p.check_identifier().is_err());
    }

    #[test]
    fn json_uses_camel_case_and_hex() {
        let p = proof();
        let json = p.to_json().unwrap();
        assert!(json.contains("\"claimInfo\""));
        assert!(json.contains("\"signedClaim\""));
        assert!(json.contains("\"timestampS\":1738255480"));
        assert!(json.contains("\"owner\":\"0x2edddad5144aa9ab7e70c7c9c03c5fe5741be5cb\""));
        assert_eq!(Proof::from_json(&json).unwrap(), p);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Proof::from_json("{\"claimInfo\":"),
            Err(ClaimError::Malformed(_))
        ));
    }
}
