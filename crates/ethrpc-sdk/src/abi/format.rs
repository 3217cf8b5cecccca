//! Return-value formatting

use std::str::FromStr;

use ethrpc_primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decode::split_words;
use crate::SdkError;

/// Requested shape of a call result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// Split into 32-byte words
    Array,
    /// Machine integer
    Int,
    /// 256-bit integer
    #[serde(alias = "BigNumber")]
    BigNumber,
    /// Raw value, unchanged
    #[default]
    String,
}

impl ReturnKind {
    /// Case-insensitive; anything unrecognised passes the result through
    pub fn from_text(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "array" => ReturnKind::Array,
            "int" => ReturnKind::Int,
            "bignumber" => ReturnKind::BigNumber,
            _ => ReturnKind::String,
        }
    }
}

impl FromStr for ReturnKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ReturnKind::from_text(s))
    }
}

/// A formatted call result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted {
    /// Unconverted result
    Raw(Value),
    /// `0x`-prefixed 32-byte words
    Words(Vec<String>),
    /// Machine integer
    Int(i64),
    /// 256-bit integer
    BigNumber(U256),
}

impl Formatted {
    /// Render back to JSON; integers wider than 64 bits become decimal text
    pub fn to_json(&self) -> Value {
        match self {
            Formatted::Raw(v) => v.clone(),
            Formatted::Words(words) => Value::from(words.clone()),
            Formatted::Int(n) => Value::from(*n),
            Formatted::BigNumber(n) => Value::String(n.to_string()),
        }
    }
}

/// Convert `raw` according to `kind`.
///
/// Conversion failures are logged and the raw value is returned unchanged.
pub fn format_result(kind: ReturnKind, raw: Value) -> Formatted {
    let converted = match kind {
        ReturnKind::String => return Formatted::Raw(raw),
        ReturnKind::Array => as_text(&raw).and_then(|s| {
            split_words(s).map(|words| Formatted::Words(words.collect()))
        }),
        ReturnKind::Int => parse_int(&raw).map(Formatted::Int),
        ReturnKind::BigNumber => parse_big(&raw).map(Formatted::BigNumber),
    };
    match converted {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!("Could not format result as {:?}, returning it unchanged: {}", kind, e);
            Formatted::Raw(raw)
        }
    }
}

fn as_text(raw: &Value) -> Result<&str, SdkError> {
    raw.as_str()
        .ok_or_else(|| SdkError::AbiDecode(format!("expected hex text, got {}", raw)))
}

fn parse_int(raw: &Value) -> Result<i64, SdkError> {
    if let Some(n) = raw.as_i64() {
        return Ok(n);
    }
    let text = as_text(raw)?.trim();
    let parsed = match text.strip_prefix("0x") {
        Some(digits) => i64::from_str_radix(digits, 16),
        None => text.parse::<i64>(),
    };
    parsed.map_err(|e| SdkError::AbiDecode(format!("{:?} is not an integer: {}", text, e)))
}

fn parse_big(raw: &Value) -> Result<U256, SdkError> {
    if let Some(n) = raw.as_u64() {
        return Ok(U256::from(n));
    }
    let text = as_text(raw)?.trim();
    let (digits, hex) = match text.strip_prefix("0x") {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    if digits.is_empty() {
        return Err(SdkError::AbiDecode(format!("{:?} has no digits", text)));
    }
    let parsed = if hex {
        U256::from_str_radix(digits, 16).map_err(|e| format!("{:?}", e))
    } else {
        U256::from_dec_str(digits).map_err(|e| format!("{:?}", e))
    };
    parsed.map_err(|e| SdkError::AbiDecode(format!("{:?}: {}", text, e)))
}
