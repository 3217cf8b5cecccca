//! Function selectors

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::ParamType;
use crate::SdkError;

/// How the 4-byte selector prefix is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorStyle {
    /// Drop leading `'0'` hex digits (`0x095ea7b3` becomes `0x95ea7b3`)
    #[default]
    StripLeadingZeros,
    /// Always eight hex digits
    Fixed,
}

/// `0x`-prefixed function selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    /// Selector text including the `0x` prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digits after the prefix
    pub fn digits(&self) -> &str {
        &self.0[2..]
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expand a compact signature such as `"iia"` into parameter types
pub fn parse_signature(compact: &str) -> Result<Vec<ParamType>, SdkError> {
    compact.chars().map(ParamType::from_code).collect()
}

/// Canonical `name(type1,type2)` form used as hash input
pub fn canonical_signature(name: &str, types: &[ParamType]) -> String {
    let types: Vec<String> = types.iter().map(ToString::to_string).collect();
    format!("{}({})", name, types.join(","))
}

/// Selector for an already canonical signature
pub fn selector_for(canonical: &str, style: SelectorStyle) -> Selector {
    let digest = ethrpc_crypto::keccak256_hex(canonical.as_bytes());
    let prefix = &digest[..8];
    let prefix = match style {
        SelectorStyle::StripLeadingZeros => prefix.trim_start_matches('0'),
        SelectorStyle::Fixed => prefix,
    };
    Selector(format!("0x{}", prefix))
}

/// Derive the selector of `name` with compact signature `compact`
pub fn derive_selector(
    name: &str,
    compact: &str,
    style: SelectorStyle,
) -> Result<Selector, SdkError> {
    let types = parse_signature(compact)?;
    Ok(selector_for(&canonical_signature(name, &types), style))
}
