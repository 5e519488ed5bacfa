//! Attested claims and the proofs that carry them.
//!
//! A claim is a statement about data fetched from an external provider. The
//! claim body (`provider`, `parameters`, `context`) together with its owner,
//! timestamp and epoch is hashed into a [`ClaimId`]; committee attestors sign a
//! canonical serialization of that identifier. This crate only re-derives and
//! checks what external proof producers emit, it never produces the
//! underlying provider data itself.
//!
//! [`ClaimId`]: attest_types::ClaimId

pub mod claim;
pub mod error;
pub mod identifier;
pub mod signing;

pub use claim::{ClaimInfo, ClaimSignature, CompleteClaimData, Proof, SignedClaim};
pub use error::ClaimError;
pub use identifier::compute_identifier;
pub use signing::{recover_signer, serialize_for_signing, sign_claim};
