//! Committee signature tally per claim identifier.

use attest_types::{Address, ClaimId};

/// Committee signers grouped by the claim identifier they signed, in the
/// order identifiers were first seen.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    groups: Vec<(ClaimId, Vec<Address>)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, identifier: ClaimId, signer: Address) {
        match self.groups.iter_mut().find(|(id, _)| *id == identifier) {
            Some((_, signers)) => signers.push(signer),
            None => self.groups.push((identifier, vec![signer])),
        }
    }

    /// The identifier with strictly more committee signatures than any
    /// other, with its signers. `None` on a tie or an empty tally.
    pub fn leader(&self) -> Option<(ClaimId, &[Address])> {
        let top = self.groups.iter().map(|(_, s)| s.len()).max()?;
        let mut leaders = self.groups.iter().filter(|(_, s)| s.len() == top);
        let (id, signers) = leaders.next()?;
        if leaders.next().is_some() {
            return None;
        }
        Some((*id, signers.as_slice()))
    }

    /// Largest number of committee signatures on any single identifier.
    pub fn top_count(&self) -> usize {
        self.groups.iter().map(|(_, s)| s.len()).max().unwrap_or(0)
    }

    /// Signers of every identifier other than `identifier`.
    pub fn dissenters(&self, identifier: &ClaimId) -> Vec<Address> {
        self.groups
            .iter()
            .filter(|(id, _)| id != identifier)
            .flat_map(|(_, signers)| signers.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> ClaimId {
        ClaimId::new([n; 32])
    }

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn strict_plurality_leads() {
        let mut tally = Tally::new();
        tally.record(id(1), addr(1));
        tally.record(id(2), addr(2));
        tally.record(id(1), addr(3));

        let (leader, signers) = tally.leader().unwrap();
        assert_eq!(leader, id(1));
        assert_eq!(signers, &[addr(1), addr(3)]);
        assert_eq!(tally.dissenters(&leader), vec![addr(2)]);
        assert_eq!(tally.top_count(), 2);
    }

    #[test]
    fn tie_has_no_leader() {
        let mut tally = Tally::new();
        tally.record(id(1), addr(1));
        tally.record(id(2), addr(2));
        assert!(tally.leader().is_none());
        assert_eq!(tally.top_count(), 1);
        assert!(Tally::new().leader().is_none());
    }
}
