//! Parse errors for fixed-size byte types

use thiserror::Error;

/// Failure to build an [`Address`](crate::Address) or [`H256`](crate::H256)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Input is not valid hex
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte count does not match the type
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Bytes required by the type
        expected: usize,
        /// Bytes supplied
        got: usize,
    },
}
