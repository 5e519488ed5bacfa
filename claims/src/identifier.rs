//! Claim identifier derivation.
//!
//! The identifier is the tagged, length-prefixed Blake2b-256 digest of the six
//! claim fields, so free-form `parameters` and `context` text cannot be
//! shifted between fields without changing it.

use crate::claim::ClaimInfo;
use attest_crypto::blake2b_256_fields;
use attest_types::{Address, ClaimId};

/// Domain separation tag for claim identifiers.
const IDENTIFIER_TAG: &[u8] = b"attest/claim-identifier/v1";

/// Compute the identifier of a claim body from its six constituent fields.
pub fn compute_identifier(
    info: &ClaimInfo,
    owner: &Address,
    timestamp_s: u64,
    epoch: u32,
) -> ClaimId {
    let timestamp = timestamp_s.to_le_bytes();
    let epoch = epoch.to_le_bytes();
    ClaimId::new(blake2b_256_fields(
        IDENTIFIER_TAG,
        &[
            info.provider.as_bytes(),
            info.parameters.as_bytes(),
            info.context.as_bytes(),
            owner.as_bytes().as_slice(),
            timestamp.as_slice(),
            epoch.as_slice(),
        ],
    ))
}
