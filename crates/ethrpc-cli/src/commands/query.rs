//! Query commands

use clap::Subcommand;
use ethrpc_sdk::types::BlockId;
use ethrpc_sdk::H256;

use super::{connect, parse_address};
use crate::{config::Config, output::Output, CliError};

/// Query subcommands
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Query current block number
    BlockNumber,
    /// Query current gas price
    GasPrice,
    /// Query the node's coinbase account
    Coinbase,
    /// Query the number of connected peers
    PeerCount,
    /// Query the balance of an address, in wei
    Balance {
        /// Account address
        address: String,
        /// Block number, "latest", "pending" or "earliest"
        #[arg(default_value = "latest")]
        block: String,
    },
    /// Query the number of transactions sent from an address
    TxCount {
        /// Account address
        address: String,
    },
    /// Query the code deployed at an address
    Code {
        /// Contract address
        address: String,
        /// Block number, "latest", "pending" or "earliest"
        #[arg(default_value = "latest")]
        block: String,
    },
    /// Query transaction by hash
    Tx {
        /// Transaction hash
        hash: String,
    },
    /// Hash data with the node's Keccak-256
    Sha3 {
        /// Hex data (`0x`-prefixed) or text
        data: String,
        /// Keep only the first four bytes
        #[arg(long)]
        short: bool,
    },
}

impl QueryCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let client = connect(config)?;
        match self {
            QueryCommand::BlockNumber => {
                let number = client.block_number().await?;
                Output::new(json)
                    .field_u64("block_number", number)
                    .message(&format!("Block number: {}", number))
                    .print();
            }
            QueryCommand::GasPrice => {
                let price = client.gas_price().await?;
                Output::new(json)
                    .field("gas_price", &price.to_string())
                    .message(&format!("Gas price: {} wei", price))
                    .print();
            }
            QueryCommand::Coinbase => {
                let coinbase = client.coinbase().await?;
                Output::new(json)
                    .field("coinbase", &coinbase.to_hex())
                    .message(&coinbase.to_hex())
                    .print();
            }
            QueryCommand::PeerCount => {
                let peers = client.peer_count().await?;
                Output::new(json)
                    .field_u64("peer_count", peers)
                    .message(&format!("Peers: {}", peers))
                    .print();
            }
            QueryCommand::Balance { address, block } => {
                let address = parse_address(&address)?;
                let balance = client.balance(&address, parse_block(&block)?).await?;
                Output::new(json)
                    .field("address", &address.to_hex())
                    .field("balance", &balance.to_string())
                    .message(&format!("Balance: {} wei", balance))
                    .print();
            }
            QueryCommand::TxCount { address } => {
                let address = parse_address(&address)?;
                let count = client.tx_count(&address).await?;
                Output::new(json)
                    .field("address", &address.to_hex())
                    .field_u64("tx_count", count)
                    .message(&format!("Transactions: {}", count))
                    .print();
            }
            QueryCommand::Code { address, block } => {
                let address = parse_address(&address)?;
                let code = client.read_code(&address, parse_block(&block)?).await?;
                Output::new(json)
                    .field("address", &address.to_hex())
                    .field("code", &code)
                    .message(&code)
                    .print();
            }
            QueryCommand::Tx { hash } => {
                let hash = H256::from_hex(&hash).map_err(|e| CliError::InvalidHex(e.to_string()))?;
                match client.get_tx(&hash).await? {
                    Some(tx) => Output::new(json)
                        .message(&serde_json::to_string_pretty(&tx)?)
                        .field_value("transaction", tx)
                        .print(),
                    None => Output::new(json)
                        .field("hash", &hash.to_hex())
                        .field("status", "not found")
                        .message(&format!("Transaction {} not found", hash.to_hex()))
                        .print(),
                }
            }
            QueryCommand::Sha3 { data, short } => {
                let bytes = match data.strip_prefix("0x") {
                    Some(digits) => {
                        hex::decode(digits).map_err(|e| CliError::InvalidHex(e.to_string()))?
                    }
                    None => data.into_bytes(),
                };
                let hash = client.sha3(&bytes, short).await?;
                Output::new(json).field("hash", &hash).message(&hash).print();
            }
        }
        Ok(())
    }
}

fn parse_block(block: &str) -> Result<BlockId, CliError> {
    block.parse().map_err(CliError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block() {
        assert_eq!(parse_block("latest").unwrap(), BlockId::Latest);
        assert_eq!(parse_block("100").unwrap(), BlockId::Number(100));
        assert!(matches!(parse_block("tomorrow"), Err(CliError::InvalidInput(_))));
    }
}
