//! # ethrpc-cli
//!
//! Command-line interface for invoking smart-contract functions over JSON-RPC.
//!
//! ## Usage
//!
//! ```bash
//! # ABI commands
//! ethrpc selector foo ii
//! ethrpc encode foo ii '[5, 10]'
//! ethrpc decode 0x0000...0005 --ints
//!
//! # Contract invocation
//! ethrpc invoke --to 0x... double i 21 --returns int
//! ethrpc invoke --to 0x... set i 7 --send
//!
//! # Raw requests and node queries
//! ethrpc rpc eth_getBalance '["0x...", "latest"]'
//! ethrpc query block-number
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ethrpc_sdk::abi::{AbiLayout, SelectorStyle};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// ethrpc CLI
#[derive(Parser, Debug)]
#[command(name = "ethrpc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// RPC endpoint URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Config file (defaults to ~/.ethrpc/config.toml)
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Derive a function selector
    Selector(commands::abi::SelectorArgs),
    /// Encode calldata for a function call
    Encode(commands::abi::EncodeArgs),
    /// Split or format a hex result
    Decode(commands::abi::DecodeArgs),
    /// Call a contract function or send it as a transaction
    Invoke(commands::invoke::InvokeArgs),
    /// Send a raw JSON-RPC request
    Rpc(commands::rpc::RpcArgs),
    /// Query node state
    #[command(subcommand)]
    Query(commands::query::QueryCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set RPC URL
        #[arg(long)]
        set_rpc: Option<String>,
        /// Set the primary account
        #[arg(long)]
        set_account: Option<String>,
        /// Set the default gas limit
        #[arg(long)]
        set_gas: Option<u64>,
        /// Set selector style (strip-leading-zeros or fixed)
        #[arg(long)]
        set_selector: Option<String>,
        /// Set calldata layout (legacy or standard)
        #[arg(long)]
        set_layout: Option<String>,
    },
}

/// Requested changes to the stored configuration
struct ConfigEdit {
    show: bool,
    rpc_url: Option<String>,
    account: Option<String>,
    gas: Option<u64>,
    selector: Option<String>,
    layout: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config
    let mut config = Config::load(cli.config_file.as_deref());

    let result = match cli.command {
        Commands::Config {
            show,
            set_rpc,
            set_account,
            set_gas,
            set_selector,
            set_layout,
        } => handle_config(
            &mut config,
            cli.config_file.as_deref(),
            ConfigEdit {
                show,
                rpc_url: set_rpc,
                account: set_account,
                gas: set_gas,
                selector: set_selector,
                layout: set_layout,
            },
            cli.json,
        ),
        command => {
            // Override RPC URL if provided
            if let Some(rpc_url) = cli.rpc_url {
                config.rpc_url = rpc_url;
            }
            run(command, &config, cli.json).await
        }
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &Config, json: bool) -> Result<(), CliError> {
    match command {
        Commands::Selector(args) => args.execute(config, json),
        Commands::Encode(args) => args.execute(config, json),
        Commands::Decode(args) => args.execute(json),
        Commands::Invoke(args) => args.execute(config, json).await,
        Commands::Rpc(args) => args.execute(config, json).await,
        Commands::Query(cmd) => cmd.execute(config, json).await,
        Commands::Config { .. } => Ok(()),
    }
}

fn handle_config(
    config: &mut Config,
    path: Option<&std::path::Path>,
    edit: ConfigEdit,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(rpc) = edit.rpc_url {
        config.rpc_url = rpc;
        modified = true;
    }

    if let Some(account) = edit.account {
        commands::parse_address(&account)?;
        config.primary_account = Some(account);
        modified = true;
    }

    if let Some(gas) = edit.gas {
        config.gas_limit = gas;
        modified = true;
    }

    if let Some(selector) = edit.selector {
        config.selector = match selector.as_str() {
            "strip-leading-zeros" => SelectorStyle::StripLeadingZeros,
            "fixed" => SelectorStyle::Fixed,
            other => {
                return Err(CliError::InvalidInput(format!("unknown selector style: {}", other)))
            }
        };
        modified = true;
    }

    if let Some(layout) = edit.layout {
        config.layout = match layout.as_str() {
            "legacy" => AbiLayout::Legacy,
            "standard" => AbiLayout::Standard,
            other => return Err(CliError::InvalidInput(format!("unknown layout: {}", other))),
        };
        modified = true;
    }

    if modified {
        let saved = config.save(path)?;
        Output::new(json)
            .field("status", "saved")
            .field("path", &saved.display().to_string())
            .message(&format!("Configuration saved to {}", saved.display()))
            .print();
    } else if edit.show {
        let account = config.primary_account.as_deref().unwrap_or("(coinbase)");
        Output::new(json)
            .field("rpc_url", &config.rpc_url)
            .field("primary_account", account)
            .field_u64("gas_limit", config.gas_limit)
            .field_value("selector", serde_json::to_value(config.selector)?)
            .field_value("layout", serde_json::to_value(config.layout)?)
            .message(&format!(
                "RPC URL: {}\nPrimary account: {}\nGas Limit: {}\nSelector: {:?}\nLayout: {:?}",
                config.rpc_url, account, config.gas_limit, config.selector, config.layout
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-rpc/--set-account/--set-gas/--set-selector/--set-layout to modify")
            .print();
    }

    Ok(())
}
