//! Raw JSON-RPC command

use clap::{Args, ValueEnum};
use ethrpc_sdk::rpc::Namespace;

use super::{connect, parse_params, print_outcome};
use crate::{config::Config, CliError};

/// Method prefix selected on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NamespaceArg {
    /// `eth_`
    Eth,
    /// `net_`
    Net,
    /// `web3_`
    Web3,
    /// `db_`
    Db,
    /// `shh_`
    Shh,
    /// Method name used as given
    Raw,
}

impl From<NamespaceArg> for Namespace {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::Eth => Namespace::Eth,
            NamespaceArg::Net => Namespace::Net,
            NamespaceArg::Web3 => Namespace::Web3,
            NamespaceArg::Db => Namespace::Db,
            NamespaceArg::Shh => Namespace::Shh,
            NamespaceArg::Raw => Namespace::Raw,
        }
    }
}

/// Arguments of `ethrpc rpc`
#[derive(Debug, Args)]
pub struct RpcArgs {
    /// Method, e.g. "eth_blockNumber", or "blockNumber" with --namespace eth
    method: String,
    /// Parameters as JSON; a single value is sent as a one-element list
    params: Option<String>,
    /// Prefix prepended to the method
    #[arg(long, value_enum, default_value = "raw")]
    namespace: NamespaceArg,
}

impl RpcArgs {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let client = connect(config)?;
        let outcome = client
            .request(
                self.namespace.into(),
                &self.method,
                parse_params(self.params.as_deref()),
            )
            .await?;
        print_outcome(outcome, json)
    }
}
