//! # ethrpc-primitives
//!
//! Primitive types shared by the ethrpc crates.
//!
//! Addresses and hashes are fixed-size byte arrays rendered as lowercase
//! `0x`-prefixed hex. Big integers come from `primitive-types`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bytes;
mod error;

pub use bytes::{Address, H256};
pub use error::PrimitiveError;

// Re-export primitive-types for the big integers used by the ABI codec
pub use primitive_types::{U256, U512};

/// Gas type
pub type Gas = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u512_holds_u256_max_squared() {
        let max = U512::from(U256::MAX);
        let squared = max.checked_mul(max);
        assert!(squared.is_some());
    }
}
