//! Keccak-256 hashing

use ethrpc_primitives::H256;
use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// Keccak-256 of `data` as 64 lowercase hex digits, no prefix
pub fn keccak256_hex(data: &[u8]) -> String {
    hex::encode(keccak256(data).as_bytes())
}
