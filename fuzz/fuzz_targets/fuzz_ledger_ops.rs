#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use attest_governance::{Payout, PayoutError, StakeLedger};
use attest_types::{Address, Amount, BlockHeight};

#[derive(Debug, Arbitrary)]
enum Op {
    Stake { who: u8, amount: u64 },
    RequestUnstake { who: u8, at: u16 },
    Unstake { who: u8, at: u16 },
    SlashTotal { amount: u64 },
    SlashAccount { who: u8, amount: u64 },
    Rewards { candidates: Vec<u8>, cost: u64 },
    Pay { amount: u64 },
    Claim { who: u8 },
}

struct Sink;

impl Payout for Sink {
    fn pay(&mut self, _to: &Address, _amount: Amount) -> Result<(), PayoutError> {
        Ok(())
    }
}

fn addr(who: u8) -> Address {
    Address::new([who % 6; 20])
}

// Arbitrary operation sequences must never panic and must keep the ledger's
// stake accounting and held balance consistent.
fuzz_target!(|ops: Vec<Op>| {
    let mut ledger = StakeLedger::default();
    let mut sink = Sink;
    for op in ops.into_iter().take(64) {
        let _ = match op {
            Op::Stake { who, amount } => ledger.credit_stake(addr(who), Amount::new(amount.into())).map(drop),
            Op::RequestUnstake { who, at } => ledger.request_unstake(&addr(who), BlockHeight::new(at.into())),
            Op::Unstake { who, at } => ledger
                .unstake(&addr(who), BlockHeight::new(at.into()), 10, &mut sink)
                .map(drop),
            Op::SlashTotal { amount } => ledger.slash_total(Amount::new(amount.into())).map(drop),
            Op::SlashAccount { who, amount } => ledger
                .slash_account(&addr(who), Amount::new(amount.into()))
                .map(drop),
            Op::Rewards { candidates, cost } => {
                let candidates: Vec<Address> = candidates.into_iter().take(8).map(addr).collect();
                ledger
                    .register_rewards(&candidates, Amount::new(cost.into()), |_| true)
                    .map(drop)
            }
            Op::Pay { amount } => ledger.receive_payment(Amount::new(amount.into())),
            Op::Claim { who } => ledger.claim_rewards(&addr(who), &mut sink).map(drop),
        };
        assert!(ledger.is_conserved());
    }
});
