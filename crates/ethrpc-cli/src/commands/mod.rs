//! CLI commands

pub mod abi;
pub mod invoke;
pub mod query;
pub mod rpc;

use std::time::Duration;

use ethrpc_sdk::rpc::RpcOutcome;
use ethrpc_sdk::{Address, Client, HttpTransport};
use serde_json::Value;

use crate::{config::Config, output::display_value, output::Output, CliError};

/// Client for the configured endpoint
pub(crate) fn connect(config: &Config) -> Result<Client, CliError> {
    let client = match config.timeout_secs {
        Some(secs) => Client::with_transport(HttpTransport::with_timeout(
            &config.rpc_url,
            Duration::from_secs(secs),
        )?),
        None => Client::http(&config.rpc_url),
    };
    Ok(client.with_config(config.client_config()?))
}

pub(crate) fn parse_address(s: &str) -> Result<Address, CliError> {
    Address::from_hex(s).map_err(|e| CliError::InvalidAddress(e.to_string()))
}

/// Read a parameter argument as JSON, falling back to plain text
pub(crate) fn parse_params(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(text) => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        }
    }
}

/// Print a successful outcome; node errors become [`CliError::Rpc`]
pub(crate) fn print_outcome(outcome: RpcOutcome, json: bool) -> Result<(), CliError> {
    match outcome {
        RpcOutcome::Success(result) => {
            Output::new(json)
                .message(&display_value(&result))
                .field_value("result", result)
                .print();
            Ok(())
        }
        RpcOutcome::Bare(body) => {
            Output::new(json)
                .message(&body.to_string())
                .field_value("response", body)
                .print();
            Ok(())
        }
        RpcOutcome::Failure(error) => Err(CliError::Rpc {
            code: error.code,
            message: error.message,
        }),
    }
}
