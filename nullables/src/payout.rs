//! Nullable payout sink: records transfers instead of making them.

use attest_governance::{Payout, PayoutError};
use attest_types::{Address, Amount};

#[derive(Debug, Default)]
pub struct NullPayout {
    paid: Vec<(Address, Amount)>,
    failure: Option<String>,
}

impl NullPayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every transfer with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            paid: Vec::new(),
            failure: Some(reason.to_string()),
        }
    }

    pub fn payouts(&self) -> &[(Address, Amount)] {
        &self.paid
    }

    /// Total paid to `to` so far.
    pub fn paid_to(&self, to: &Address) -> Amount {
        self.paid
            .iter()
            .filter(|(a, _)| a == to)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

impl Payout for NullPayout {
    fn pay(&mut self, to: &Address, amount: Amount) -> Result<(), PayoutError> {
        if let Some(reason) = &self.failure {
            return Err(PayoutError(reason.clone()));
        }
        self.paid.push((*to, amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_sums() {
        let mut sink = NullPayout::new();
        let a = Address::new([1; 20]);
        sink.pay(&a, Amount::new(3)).unwrap();
        sink.pay(&Address::new([2; 20]), Amount::new(4)).unwrap();
        sink.pay(&a, Amount::new(5)).unwrap();
        assert_eq!(sink.paid_to(&a), Amount::new(8));
        assert_eq!(sink.payouts().len(), 3);
    }

    #[test]
    fn failing_sink_rejects() {
        let mut sink = NullPayout::failing("closed");
        assert_eq!(
            sink.pay(&Address::ZERO, Amount::new(1)),
            Err(PayoutError("closed".into()))
        );
        assert!(sink.payouts().is_empty());
    }
}
