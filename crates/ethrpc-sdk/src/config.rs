//! Client configuration

use ethrpc_primitives::{Address, Gas};
use serde::{Deserialize, Serialize};

use crate::abi::EncodeOptions;
use crate::types::DEFAULT_GAS;

/// Defaults applied by [`Client`](crate::Client) when building requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sender used when an invocation names none; `eth_coinbase` otherwise
    #[serde(default)]
    pub primary_account: Option<Address>,
    /// Gas limit used when a request sets none
    #[serde(default = "default_gas")]
    pub default_gas: Gas,
    /// Selector and layout choices for calldata
    #[serde(default)]
    pub encoding: EncodeOptions,
}

fn default_gas() -> Gas {
    DEFAULT_GAS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            primary_account: None,
            default_gas: default_gas(),
            encoding: EncodeOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Set the primary account
    pub fn with_primary_account(mut self, account: Address) -> Self {
        self.primary_account = Some(account);
        self
    }

    /// Set the default gas limit
    pub fn with_default_gas(mut self, gas: Gas) -> Self {
        self.default_gas = gas;
        self
    }

    /// Set the calldata encoding options
    pub fn with_encoding(mut self, encoding: EncodeOptions) -> Self {
        self.encoding = encoding;
        self
    }
}
