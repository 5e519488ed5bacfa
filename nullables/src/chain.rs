//! Nullable chain clock: block height and time that only move when told to.

use attest_types::{BlockHeight, ChainClock, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct NullChain {
    height: AtomicU64,
    secs: AtomicU64,
}

impl NullChain {
    pub fn new(height: u64, secs: u64) -> Self {
        Self {
            height: AtomicU64::new(height),
            secs: AtomicU64::new(secs),
        }
    }

    /// Mine `blocks` blocks, `block_secs` apart.
    pub fn advance_blocks(&self, blocks: u64, block_secs: u64) {
        self.height.fetch_add(blocks, Ordering::SeqCst);
        self.secs
            .fetch_add(blocks.saturating_mul(block_secs), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set_height(&self, height: u64) {
        self.height.store(height, Ordering::SeqCst);
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new(1, 1_700_000_000)
    }
}

impl ChainClock for NullChain {
    fn block_height(&self) -> BlockHeight {
        BlockHeight::new(self.height.load(Ordering::SeqCst))
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }
}
