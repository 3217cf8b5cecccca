//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error reported by the transport collaborator
    #[error("Transport error: {0}")]
    Transport(String),

    /// Error object returned by the node, surfaced by the typed wrappers
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Response carried neither a result nor an error
    #[error("no result in response to {0}")]
    MissingResult(String),

    /// Argument count does not match the declared signature
    #[error("wrong number of parameters: expected {expected}, got {got}")]
    WrongParamCount {
        /// Number of types in the signature
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// Compact signature contains a character other than `s`, `i` or `a`
    #[error("unknown type code '{0}' in signature")]
    UnknownTypeCode(char),

    /// Content does not fit in a single 32-byte word
    #[error("value needs {0} hex digits, a word holds 64")]
    WordOverflow(usize),

    /// ABI encoding error
    #[error("ABI encoding error: {0}")]
    AbiEncode(String),

    /// ABI decoding error
    #[error("ABI decoding error: {0}")]
    AbiDecode(String),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No sender was given, configured, or reported by the node
    #[error("No sender account: {0}")]
    NoSender(String),

    /// Async runtime could not be created or joined
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl SdkError {
    /// True for errors raised before anything was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SdkError::WrongParamCount { .. }
                | SdkError::UnknownTypeCode(_)
                | SdkError::WordOverflow(_)
                | SdkError::AbiEncode(_)
        )
    }
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<ethrpc_primitives::PrimitiveError> for SdkError {
    fn from(e: ethrpc_primitives::PrimitiveError) -> Self {
        match e {
            ethrpc_primitives::PrimitiveError::InvalidHex(_) => SdkError::InvalidHex(e.to_string()),
            ethrpc_primitives::PrimitiveError::InvalidLength { .. } => {
                SdkError::InvalidAddress(e.to_string())
            }
        }
    }
}
