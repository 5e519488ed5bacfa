//! Nullable infrastructure for deterministic testing.
//!
//! The protocol reaches outside itself in two places: it reads block height
//! and time from the surrounding ledger, and it moves native value out through
//! a payout sink. This crate provides controllable stand-ins for both that
//! never touch a real chain.

pub mod chain;
pub mod payout;

pub use chain::NullChain;
pub use payout::NullPayout;
