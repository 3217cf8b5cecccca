//! ABI encoding

use std::fmt;

use ethrpc_primitives::{U256, U512};
use serde::{Deserialize, Serialize};

use super::hex::{ensure_hex_digits, encode_minimal_bytes, pad_bytes_word, pad_hex_word, u256_word};
use super::selector::{canonical_signature, parse_signature, selector_for, SelectorStyle};
use super::types::{AbiValue, IntValue, ParamType};
use crate::SdkError;

/// Argument layout after the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbiLayout {
    /// All length prefixes, then all head words, then all tails. Dynamic
    /// arguments get no offset word and string tails are not padded.
    #[default]
    Legacy,
    /// Standard head/tail layout with offset words for dynamic arguments
    Standard,
}

/// Options for building calldata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Selector rendering
    #[serde(default)]
    pub selector: SelectorStyle,
    /// Argument layout
    #[serde(default)]
    pub layout: AbiLayout,
}

/// Output of encoding one value, as hex digits without prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedRegion {
    /// Length markers of dynamic values
    pub length_prefix: String,
    /// Fixed-width words
    pub head: String,
    /// Variable-length payload
    pub tail: String,
}

impl EncodedRegion {
    /// All three regions back to back
    pub fn flatten(&self) -> String {
        format!("{}{}{}", self.length_prefix, self.head, self.tail)
    }
}

/// Hex calldata: selector followed by encoded arguments.
///
/// Kept as text because a stripped selector may have an odd digit count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Calldata(String);

impl Calldata {
    /// Calldata including the `0x` prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw bytes, when the digit count is even
    pub fn to_bytes(&self) -> Result<Vec<u8>, SdkError> {
        super::hex::from_hex(&self.0)
    }
}

impl fmt::Display for Calldata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Calldata> for String {
    fn from(data: Calldata) -> Self {
        data.0
    }
}

/// Encode an integer as one head word.
///
/// Machine and decimal integers are reduced modulo `2^bits`, so negative
/// values wrap to two's complement. Hex literals are padded untouched.
pub fn encode_int(value: &IntValue, bits: usize) -> Result<String, SdkError> {
    if bits == 0 || bits > 256 {
        return Err(SdkError::AbiEncode(format!("unsupported integer width: {}", bits)));
    }
    let (magnitude, negative) = match value {
        IntValue::Hex(text) => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            ensure_hex_digits(digits)?;
            return pad_hex_word(digits);
        }
        IntValue::Native(v) => (U512::from(v.unsigned_abs()), *v < 0),
        IntValue::Decimal(text) => parse_decimal(text)?,
    };

    let modulus = U512::one() << bits;
    let mut reduced = magnitude % modulus;
    if negative && !reduced.is_zero() {
        reduced = modulus - reduced;
    }

    let mut wide = [0u8; 64];
    reduced.to_big_endian(&mut wide);
    let value = U256::from_big_endian(&wide[32..]);
    pad_bytes_word(&encode_minimal_bytes(&value))
}

fn parse_decimal(text: &str) -> Result<(U512, bool), SdkError> {
    let text = text.trim();
    let (digits, negative) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text.strip_prefix('+').unwrap_or(text), false),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(SdkError::AbiEncode(format!("invalid integer: {:?}", text)));
    }
    let magnitude = U512::from_dec_str(digits)
        .map_err(|e| SdkError::AbiEncode(format!("integer {} out of range: {:?}", text, e)))?;
    Ok((magnitude, negative))
}

/// Encode one value into its three regions.
///
/// `as_element` is set when the value is one element of an enclosing array;
/// a nested array then contributes its elements without its own length
/// prefix.
pub fn encode_value(
    value: &AbiValue,
    param_type: &ParamType,
    as_element: bool,
) -> Result<EncodedRegion, SdkError> {
    match (param_type, value) {
        (ParamType::String, AbiValue::Str(bytes)) => Ok(EncodedRegion {
            length_prefix: u256_word(&U256::from(bytes.len())),
            head: String::new(),
            tail: hex::encode(bytes),
        }),
        (ParamType::Int(bits), AbiValue::Int(int)) => Ok(EncodedRegion {
            head: encode_int(int, *bits)?,
            ..Default::default()
        }),
        (ParamType::Array(inner), AbiValue::Array(items)) => {
            let mut tail = String::new();
            for item in items {
                tail.push_str(&encode_value(item, inner, true)?.flatten());
            }
            let length_prefix = if as_element {
                String::new()
            } else {
                u256_word(&U256::from(items.len()))
            };
            Ok(EncodedRegion {
                length_prefix,
                head: String::new(),
                tail,
            })
        }
        (ty, v) => Err(SdkError::AbiEncode(format!(
            "value {:?} does not match type {}",
            v, ty
        ))),
    }
}

/// Encode arguments (without selector) as hex digits
pub fn encode_args(
    types: &[ParamType],
    values: &[AbiValue],
    layout: AbiLayout,
) -> Result<String, SdkError> {
    if types.len() != values.len() {
        return Err(SdkError::WrongParamCount {
            expected: types.len(),
            got: values.len(),
        });
    }
    match layout {
        AbiLayout::Legacy => {
            let mut prefixes = String::new();
            let mut heads = String::new();
            let mut tails = String::new();
            for (param_type, value) in types.iter().zip(values) {
                let region = encode_value(value, param_type, false)?;
                prefixes.push_str(&region.length_prefix);
                heads.push_str(&region.head);
                tails.push_str(&region.tail);
            }
            Ok(format!("{}{}{}", prefixes, heads, tails))
        }
        AbiLayout::Standard => Ok(hex::encode(encode_params(types, values)?)),
    }
}

/// Build calldata for `name` with compact signature `compact`
pub fn encode_call(
    name: &str,
    compact: &str,
    values: &[AbiValue],
    options: &EncodeOptions,
) -> Result<Calldata, SdkError> {
    let types = parse_signature(compact)?;
    let args = encode_args(&types, values, options.layout)?;
    let selector = selector_for(&canonical_signature(name, &types), options.selector);
    Ok(Calldata(format!("{}{}", selector, args)))
}

/// Standard head/tail encoding of a parameter list
fn encode_params(types: &[ParamType], values: &[AbiValue]) -> Result<Vec<u8>, SdkError> {
    let head_size = 32 * types.len();

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (param_type, value) in types.iter().zip(values) {
        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(word_bytes(&u256_word(&U256::from(offset)))?);
            tail.extend(encode_standard_token(param_type, value)?);
        } else {
            head.extend(encode_standard_token(param_type, value)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

fn encode_standard_token(param_type: &ParamType, value: &AbiValue) -> Result<Vec<u8>, SdkError> {
    match (param_type, value) {
        (ParamType::Int(bits), AbiValue::Int(int)) => word_bytes(&encode_int(int, *bits)?),
        (ParamType::String, AbiValue::Str(bytes)) => {
            let mut result = word_bytes(&u256_word(&U256::from(bytes.len())))?;
            let padded_len = bytes.len().div_ceil(32) * 32;
            let mut padded = vec![0u8; padded_len];
            padded[..bytes.len()].copy_from_slice(bytes);
            result.extend(padded);
            Ok(result)
        }
        (ParamType::Array(inner), AbiValue::Array(items)) => {
            let mut result = word_bytes(&u256_word(&U256::from(items.len())))?;
            let inner_types = vec![(**inner).clone(); items.len()];
            result.extend(encode_params(&inner_types, items)?);
            Ok(result)
        }
        (ty, v) => Err(SdkError::AbiEncode(format!(
            "value {:?} does not match type {}",
            v, ty
        ))),
    }
}

fn word_bytes(word: &str) -> Result<Vec<u8>, SdkError> {
    Ok(hex::decode(word)?)
}
