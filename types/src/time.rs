//! Ledger time: wall-clock timestamps and block heights.
//!
//! Task validity windows are expressed in Unix seconds; bonding windows are
//! expressed in blocks. Neither is driven by a local timer: both are read from
//! the ledger's clock at the moment a call is admitted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by `secs`, saturating at `u64::MAX`.
    pub fn saturating_add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Height of a block in the surrounding ledger.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockHeight(u64);

impl BlockHeight {
    pub const GENESIS: Self = Self(0);

    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn blocks_since(&self, earlier: BlockHeight) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The surrounding ledger's view of time, read when a call is admitted.
pub trait ChainClock {
    fn block_height(&self) -> BlockHeight;
    fn timestamp(&self) -> Timestamp;
}

impl<T: ChainClock + ?Sized> ChainClock for Arc<T> {
    fn block_height(&self) -> BlockHeight {
        (**self).block_height()
    }

    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
}
