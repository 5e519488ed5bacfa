//! Errors raised while parsing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex value {value:?}: expected {expected_bytes} bytes")]
    InvalidHex { expected_bytes: usize, value: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },
}
