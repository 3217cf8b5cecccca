//! JSON-RPC 2.0 request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SdkError;

/// JSON-RPC protocol version
pub const JSONRPC_VERSION: &str = "2.0";

/// Method namespace, which decides the method name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    /// Node methods (`eth_`)
    #[default]
    Eth,
    /// Network methods (`net_`)
    Net,
    /// Utility methods (`web3_`)
    Web3,
    /// Database methods (`db_`)
    Db,
    /// Messaging methods (`shh_`)
    Shh,
    /// Method name used verbatim
    Raw,
}

impl Namespace {
    /// Prefix prepended to method names
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Eth => "eth_",
            Namespace::Net => "net_",
            Namespace::Web3 => "web3_",
            Namespace::Db => "db_",
            Namespace::Shh => "shh_",
            Namespace::Raw => "",
        }
    }

    /// Full method name for `command`
    pub fn method(&self, command: &str) -> String {
        format!("{}{}", self.prefix(), command)
    }
}

/// Outgoing JSON-RPC request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcEnvelope {
    /// Request ID, unique within a session
    pub id: u64,
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Full method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

/// Error object of a JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Optional additional data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    /// Read an `error` member of any shape.
    ///
    /// A missing code becomes 0. The message falls back to the error text
    /// itself, or to its JSON rendering.
    pub fn from_value(error: Value) -> Self {
        match error {
            Value::Object(mut fields) => {
                let code = fields.get("code").and_then(Value::as_i64).unwrap_or(0);
                let message = match fields.remove("message") {
                    Some(Value::String(message)) => message,
                    Some(other) if !other.is_null() => other.to_string(),
                    _ => Value::Object(fields.clone()).to_string(),
                };
                RpcErrorObject {
                    code,
                    message,
                    data: fields.remove("data").filter(|d| !d.is_null()),
                }
            }
            Value::String(message) => RpcErrorObject {
                code: 0,
                message,
                data: None,
            },
            other => RpcErrorObject {
                code: 0,
                message: other.to_string(),
                data: None,
            },
        }
    }
}

/// Incoming JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Echoed request ID
    #[serde(default)]
    pub id: Option<Value>,
    /// Result (on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (on failure), kept as sent since nodes disagree on its shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// How a request resolved
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome<T = Value> {
    /// The node returned a result
    Success(T),
    /// The node returned an error object
    Failure(RpcErrorObject),
    /// The response had neither result nor error; the whole body is kept
    Bare(Value),
}

impl<T> RpcOutcome<T> {
    /// Transform the success value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RpcOutcome<U> {
        match self {
            RpcOutcome::Success(v) => RpcOutcome::Success(f(v)),
            RpcOutcome::Failure(e) => RpcOutcome::Failure(e),
            RpcOutcome::Bare(v) => RpcOutcome::Bare(v),
        }
    }

    /// Success value, if any
    pub fn success(self) -> Option<T> {
        match self {
            RpcOutcome::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Error object, if any
    pub fn failure(&self) -> Option<&RpcErrorObject> {
        match self {
            RpcOutcome::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// True when the node reported an error
    pub fn is_failure(&self) -> bool {
        matches!(self, RpcOutcome::Failure(_))
    }

    /// Treat anything but a result as an error
    pub fn into_result(self, method: &str) -> Result<T, SdkError> {
        match self {
            RpcOutcome::Success(v) => Ok(v),
            RpcOutcome::Failure(e) => Err(SdkError::Rpc {
                code: e.code,
                message: e.message,
            }),
            RpcOutcome::Bare(_) => Err(SdkError::MissingResult(method.to_string())),
        }
    }
}

impl RpcOutcome {
    /// Classify a decoded response body
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        if !body.is_object() {
            return Ok(RpcOutcome::Bare(body));
        }
        let response: RpcResponse = serde_json::from_value(body.clone())?;
        Ok(match response {
            RpcResponse { error: Some(error), .. } if !error.is_null() => {
                RpcOutcome::Failure(RpcErrorObject::from_value(error))
            }
            RpcResponse { result: Some(result), .. } if !result.is_null() => {
                RpcOutcome::Success(result)
            }
            _ => RpcOutcome::Bare(body),
        })
    }
}

/// Normalize parameters to a positional list.
///
/// Arrays are used as-is, `null` becomes an empty list and any other value is
/// wrapped in a one-element list.
pub fn normalize_params(params: Value) -> Vec<Value> {
    match params {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
