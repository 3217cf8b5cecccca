//! # ethrpc-crypto
//!
//! Keccak-256, the hash behind function selectors and `web3_sha3`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{keccak256, keccak256_hex};
