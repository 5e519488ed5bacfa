//! The boundary through which native value leaves the ledger.

use attest_types::{Address, Amount};
use thiserror::Error;

/// A sink that moves native value out of the ledger to an external principal.
///
/// The ledger always updates its own books before calling [`Payout::pay`] and
/// restores them if the sink reports failure.
pub trait Payout {
    fn pay(&mut self, to: &Address, amount: Amount) -> Result<(), PayoutError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PayoutError(pub String);
