//! Deterministic committee selection.

use crate::error::TaskError;
use attest_crypto::blake2b_256_multi;
use attest_types::{Address, TaskId, Timestamp};
use std::collections::HashSet;

/// Draw `size` distinct addresses from `attestors`.
///
/// Every candidate gets the score `Blake2b(seed || id || timestamp || address)`
/// and the `size` lowest scores form the committee, ordered by score. Any
/// party holding the same registry snapshot and task parameters derives the
/// same committee. Repeated addresses in `attestors` are considered once.
pub fn select_committee(
    attestors: &[Address],
    seed: &[u8; 32],
    id: TaskId,
    timestamp: Timestamp,
    size: u32,
) -> Result<Vec<Address>, TaskError> {
    if size == 0 {
        return Err(TaskError::InvalidCommitteeSize);
    }
    let mut seen = HashSet::new();
    let distinct: Vec<Address> = attestors.iter().copied().filter(|a| seen.insert(*a)).collect();
    if distinct.len() < size as usize {
        return Err(TaskError::NotEnoughAttestors {
            needed: size,
            available: distinct.len(),
        });
    }

    let id_bytes = id.to_le_bytes();
    let ts_bytes = timestamp.as_secs().to_le_bytes();
    let mut scored: Vec<([u8; 32], Address)> = distinct
        .into_iter()
        .map(|address| {
            let score = blake2b_256_multi(&[
                seed.as_slice(),
                &id_bytes[..],
                &ts_bytes[..],
                address.as_bytes().as_slice(),
            ]);
            (score, address)
        })
        .collect();

    scored.sort_unstable();
    scored.truncate(size as usize);
    Ok(scored.into_iter().map(|(_, address)| address).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: u8) -> Vec<Address> {
        (1..=n).map(|i| Address::new([i; 20])).collect()
    }

    #[test]
    fn selection_is_deterministic() {
        let a = select_committee(&pool(10), &[7; 32], 2, Timestamp::new(100), 3).unwrap();
        let b = select_committee(&pool(10), &[7; 32], 2, Timestamp::new(100), 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn selection_is_without_replacement() {
        let committee = select_committee(&pool(5), &[1; 32], 2, Timestamp::new(0), 5).unwrap();
        let distinct: HashSet<_> = committee.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn seed_id_and_time_all_feed_the_draw() {
        let attestors = pool(40);
        let base = select_committee(&attestors, &[1; 32], 2, Timestamp::new(0), 4).unwrap();
        let other_seed = select_committee(&attestors, &[2; 32], 2, Timestamp::new(0), 4).unwrap();
        let other_id = select_committee(&attestors, &[1; 32], 3, Timestamp::new(0), 4).unwrap();
        let other_time = select_committee(&attestors, &[1; 32], 2, Timestamp::new(1), 4).unwrap();
        assert_ne!(base, other_seed);
        assert_ne!(base, other_id);
        assert_ne!(base, other_time);
    }

    #[test]
    fn too_few_attestors() {
        let mut attestors = pool(2);
        attestors.push(Address::new([1; 20]));
        assert_eq!(
            select_committee(&attestors, &[0; 32], 2, Timestamp::new(0), 3),
            Err(TaskError::NotEnoughAttestors {
                needed: 3,
                available: 2
            })
        );
    }
}
