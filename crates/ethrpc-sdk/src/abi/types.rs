//! ABI type definitions

use std::fmt;

use serde_json::Value;

use crate::SdkError;

/// Parameter types reachable from a compact signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Byte string (`s`)
    String,
    /// Signed integer with bit size (`i` is `Int(256)`)
    Int(usize),
    /// Dynamic array (`a` is `Array(Int(256))`)
    Array(Box<ParamType>),
}

impl ParamType {
    /// Map a compact type code to its parameter type
    pub fn from_code(code: char) -> Result<Self, SdkError> {
        match code {
            's' => Ok(ParamType::String),
            'i' => Ok(ParamType::Int(256)),
            'a' => Ok(ParamType::Array(Box::new(ParamType::Int(256)))),
            other => Err(SdkError::UnknownTypeCode(other)),
        }
    }

    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::String | ParamType::Array(_))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

/// An integer argument, kept in the form the caller supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntValue {
    /// Machine integer
    Native(i128),
    /// `0x`-prefixed hex literal, padded without reduction
    Hex(String),
    /// Decimal text of any length, optionally negative
    Decimal(String),
}

impl From<i128> for IntValue {
    fn from(value: i128) -> Self {
        IntValue::Native(value)
    }
}

impl From<i64> for IntValue {
    fn from(value: i64) -> Self {
        IntValue::Native(value.into())
    }
}

impl From<u64> for IntValue {
    fn from(value: u64) -> Self {
        IntValue::Native(value.into())
    }
}

impl From<&str> for IntValue {
    fn from(text: &str) -> Self {
        let text = text.trim();
        if text.starts_with("0x") || text.starts_with("0X") {
            IntValue::Hex(text.to_string())
        } else {
            IntValue::Decimal(text.to_string())
        }
    }
}

/// ABI argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Integer
    Int(IntValue),
    /// Byte string, one byte per character
    Str(Vec<u8>),
    /// Array of values sharing one element type
    Array(Vec<AbiValue>),
}

impl AbiValue {
    /// Create an integer value
    pub fn int(value: impl Into<IntValue>) -> Self {
        AbiValue::Int(value.into())
    }

    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        AbiValue::Str(s.into().into_bytes())
    }

    /// Create an integer array
    pub fn int_array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<IntValue>,
    {
        AbiValue::Array(items.into_iter().map(|v| AbiValue::Int(v.into())).collect())
    }

    /// Build a value for `param_type` from a loosely typed JSON argument.
    ///
    /// This is the only place argument shapes are inspected: numbers and
    /// numeric text become integers, text becomes a string for string slots,
    /// and JSON arrays become arrays of the element type.
    pub fn from_json(value: &Value, param_type: &ParamType) -> Result<Self, SdkError> {
        match (param_type, value) {
            (ParamType::String, Value::String(s)) => Ok(AbiValue::string(s.as_str())),
            (ParamType::String, Value::Number(n)) => Ok(AbiValue::string(n.to_string())),
            (ParamType::Int(_), Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    Ok(AbiValue::int(v))
                } else if let Some(v) = n.as_u64() {
                    Ok(AbiValue::int(v))
                } else {
                    Err(SdkError::AbiEncode(format!("not an integer: {}", n)))
                }
            }
            (ParamType::Int(_), Value::String(s)) => Ok(AbiValue::int(s.as_str())),
            (ParamType::Array(inner), Value::Array(items)) => items
                .iter()
                .map(|item| AbiValue::from_json(item, inner))
                .collect::<Result<Vec<_>, _>>()
                .map(AbiValue::Array),
            (ty, v) => Err(SdkError::AbiEncode(format!(
                "cannot use {} as {}",
                v, ty
            ))),
        }
    }
}
