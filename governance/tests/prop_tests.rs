use proptest::prelude::*;

use attest_governance::{Payout, PayoutError, StakeLedger};
use attest_types::{Address, Amount, BlockHeight};

struct Sink;

impl Payout for Sink {
    fn pay(&mut self, _to: &Address, _amount: Amount) -> Result<(), PayoutError> {
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum Op {
    Stake(u8, u128),
    RequestUnstake(u8),
    Unstake(u8),
    Slash(u128),
    SlashAttestor(u8, u128),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6, 1u128..1_000_000).prop_map(|(a, n)| Op::Stake(a, n)),
        (0u8..6).prop_map(Op::RequestUnstake),
        (0u8..6).prop_map(Op::Unstake),
        (0u128..2_000_000).prop_map(Op::Slash),
        (0u8..6, 0u128..1_000_000).prop_map(|(a, n)| Op::SlashAttestor(a, n)),
    ]
}

proptest! {
    /// Whatever mix of stake, unstake and slash operations runs, and whichever
    /// of them fail, the per-account stakes keep summing to the total.
    #[test]
    fn stake_is_conserved(ops in prop::collection::vec(arb_op(), 1..64)) {
        let mut ledger = StakeLedger::new();
        let mut slashed = Amount::ZERO;
        for (block, op) in ops.into_iter().enumerate() {
            let now = BlockHeight::new(block as u64 * 5);
            match op {
                Op::Stake(a, n) => {
                    let _ = ledger.credit_stake(Address::new([a; 20]), Amount::new(n));
                }
                Op::RequestUnstake(a) => {
                    let _ = ledger.request_unstake(&Address::new([a; 20]), now);
                }
                Op::Unstake(a) => {
                    let _ = ledger.unstake(&Address::new([a; 20]), now, 10, &mut Sink);
                }
                Op::Slash(n) => {
                    if ledger.slash_total(Amount::new(n)).is_ok() {
                        slashed = slashed + Amount::new(n);
                    }
                }
                Op::SlashAttestor(a, n) => {
                    if ledger.slash_account(&Address::new([a; 20]), Amount::new(n)).is_ok() {
                        slashed = slashed + Amount::new(n);
                    }
                }
            }
            prop_assert!(ledger.is_conserved());
        }
        prop_assert_eq!(ledger.total_slashed(), slashed);
    }

    /// Reward shares never exceed the distributed cost.
    #[test]
    fn rewards_never_exceed_cost(
        stakes in prop::collection::vec(1u128..1_000_000_000_000, 1..12),
        cost in 0u128..1_000_000_000_000_000_000_000,
    ) {
        let mut ledger = StakeLedger::new();
        let mut candidates = Vec::new();
        for (i, stake) in stakes.iter().enumerate() {
            let address = Address::new([i as u8; 20]);
            ledger.credit_stake(address, Amount::new(*stake)).unwrap();
            candidates.push(address);
        }
        let rewards = ledger.register_rewards(&candidates, Amount::new(cost), |_| true).unwrap();
        let paid: u128 = rewards.iter().map(|(_, a)| a.raw()).sum();
        prop_assert!(paid <= cost);
        prop_assert!(cost - paid < stakes.len() as u128);
    }
}
