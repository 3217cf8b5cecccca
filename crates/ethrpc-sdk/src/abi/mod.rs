//! ABI encoding and decoding for contract calls
//!
//! This module provides functionality for:
//! - Deriving function selectors from compact signatures
//! - Encoding arguments into calldata
//! - Splitting and formatting returned data
//!
//! # Example
//!
//! ```rust
//! use ethrpc_sdk::abi::{decode_words, encode_call, AbiValue, EncodeOptions};
//!
//! let data = encode_call("foo", "ii", &[AbiValue::int(5i64), AbiValue::int(10i64)], &EncodeOptions::default())?;
//! assert!(data.as_str().starts_with("0x36184348"));
//!
//! let values = decode_words(&format!("0x{}", &data.as_str()[10..]))?;
//! assert_eq!(values.len(), 2);
//! # Ok::<(), ethrpc_sdk::SdkError>(())
//! ```

mod decode;
mod encode;
mod format;
pub mod hex;
mod selector;
mod types;

pub use decode::{decode_words, split_fixed_stride, split_words, StrideWords, DEFAULT_START};
pub use encode::{
    encode_args, encode_call, encode_int, encode_value, AbiLayout, Calldata, EncodeOptions,
    EncodedRegion,
};
pub use format::{format_result, Formatted, ReturnKind};
pub use selector::{
    canonical_signature, derive_selector, parse_signature, selector_for, Selector, SelectorStyle,
};
pub use types::{AbiValue, IntValue, ParamType};
