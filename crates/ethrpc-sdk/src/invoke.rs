//! Contract invocation requests

use ethrpc_primitives::{Address, Gas, U256};
use serde_json::Value;

use crate::abi::{encode_call, parse_signature, AbiValue, Calldata, EncodeOptions, ReturnKind};
use crate::rpc::normalize_params;
use crate::types::TransactionRequest;
use crate::SdkError;

/// A contract function call or transaction to perform.
///
/// ```rust
/// use ethrpc_sdk::{abi::AbiValue, Address, Invocation};
///
/// let contract = Address::from_bytes([0x42; 20]);
/// let invocation = Invocation::new(contract, "double", "i")
///     .param(AbiValue::int(21i64))
///     .send();
/// assert!(invocation.send);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Sender; falls back to the configured primary account, then the
    /// node's coinbase
    pub from: Option<Address>,
    /// Contract address
    pub to: Option<Address>,
    /// Function name
    pub function: String,
    /// Compact signature, one of `s`, `i`, `a` per parameter
    pub signature: String,
    /// Arguments, one per signature character
    pub params: Vec<AbiValue>,
    /// Requested result shape
    pub returns: Option<ReturnKind>,
    /// `eth_sendTransaction` when true, `eth_call` otherwise
    pub send: bool,
    /// Gas limit; the client default applies when unset
    pub gas: Option<Gas>,
    /// Value to transfer, in wei
    pub value: Option<U256>,
}

impl Invocation {
    /// Call `function` with compact `signature` on contract `to`
    pub fn new(to: Address, function: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            to: Some(to),
            function: function.into(),
            signature: signature.into(),
            ..Default::default()
        }
    }

    /// Append an argument
    pub fn param(mut self, value: AbiValue) -> Self {
        self.params.push(value);
        self
    }

    /// Replace all arguments
    pub fn with_params(mut self, params: Vec<AbiValue>) -> Self {
        self.params = params;
        self
    }

    /// Replace all arguments with values read from loosely typed JSON.
    ///
    /// Accepts a JSON array, a single scalar, or text holding a JSON array
    /// (`"[1,2]"`). Each element is converted for its signature slot.
    pub fn with_json_params(mut self, params: Value) -> Result<Self, SdkError> {
        let types = parse_signature(&self.signature)?;
        let params = match params {
            Value::String(text) if text.starts_with('[') && text.ends_with(']') => {
                serde_json::from_str(&text)?
            }
            other => other,
        };
        let params = normalize_params(params);
        if params.len() != types.len() {
            return Err(SdkError::WrongParamCount {
                expected: types.len(),
                got: params.len(),
            });
        }
        self.params = params
            .iter()
            .zip(&types)
            .map(|(value, ty)| AbiValue::from_json(value, ty))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Set the sender
    pub fn sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Request a formatted result
    pub fn returns(mut self, kind: ReturnKind) -> Self {
        self.returns = Some(kind);
        self
    }

    /// Submit as a state-changing transaction
    pub fn send(mut self) -> Self {
        self.send = true;
        self
    }

    /// Set the gas limit
    pub fn gas(mut self, gas: Gas) -> Self {
        self.gas = Some(gas);
        self
    }

    /// Set the value to transfer
    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Encode selector and arguments
    pub fn calldata(&self, options: &EncodeOptions) -> Result<Calldata, SdkError> {
        encode_call(&self.function, &self.signature, &self.params, options)
    }

    /// Transaction object carrying `data` from `from`
    pub fn transaction(&self, from: Address, data: Calldata) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            to: self.to,
            data: Some(data.into()),
            gas: self.gas,
            gas_price: None,
            value: self.value,
        }
    }
}
