//! Contract invocation command

use clap::Args;
use ethrpc_sdk::abi::{format_result, ReturnKind};
use ethrpc_sdk::rpc::RpcOutcome;
use ethrpc_sdk::{Invocation, U256};

use super::{connect, parse_address, parse_params, print_outcome};
use crate::{config::Config, output::display_value, output::Output, CliError};

/// Arguments of `ethrpc invoke`
#[derive(Debug, Args)]
pub struct InvokeArgs {
    /// Contract address
    #[arg(long)]
    to: String,
    /// Function name
    function: String,
    /// Compact signature, e.g. "iia"
    #[arg(default_value = "")]
    signature: String,
    /// Parameters as JSON, e.g. '[5, "text", [1, 2]]'
    params: Option<String>,
    /// Sender (defaults to the configured account, then the coinbase)
    #[arg(long)]
    from: Option<String>,
    /// Format the result as array, int, bignumber or string
    #[arg(long)]
    returns: Option<String>,
    /// Send a transaction instead of a call
    #[arg(long)]
    send: bool,
    /// Gas limit
    #[arg(long)]
    gas: Option<u64>,
    /// Value to transfer, in wei
    #[arg(long)]
    value: Option<u128>,
}

impl InvokeArgs {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let mut invocation = Invocation::new(parse_address(&self.to)?, self.function, self.signature)
            .with_json_params(parse_params(self.params.as_deref()))?;
        if let Some(from) = &self.from {
            invocation = invocation.sender(parse_address(from)?);
        }
        if let Some(kind) = &self.returns {
            invocation = invocation.returns(ReturnKind::from_text(kind));
        }
        if self.send {
            invocation = invocation.send();
        }
        if let Some(gas) = self.gas {
            invocation = invocation.gas(gas);
        }
        if let Some(value) = self.value {
            invocation = invocation.value(U256::from(value));
        }

        let client = connect(config)?;
        let outcome = client.invoke(&invocation).await?;

        match (invocation.returns, outcome) {
            (Some(kind), RpcOutcome::Success(raw)) => {
                let formatted = format_result(kind, raw).to_json();
                Output::new(json)
                    .message(&display_value(&formatted))
                    .field_value("result", formatted)
                    .print();
                Ok(())
            }
            (_, outcome) => print_outcome(outcome, json),
        }
    }
}
