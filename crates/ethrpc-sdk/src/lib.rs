//! # ethrpc-sdk
//!
//! Invoke smart-contract functions over JSON-RPC.
//!
//! ## Features
//!
//! - **ABI**: selector derivation, calldata encoding, result splitting and formatting
//! - **Client**: asynchronous dispatcher with future and continuation entry points
//! - **BlockingClient**: the same calls, returning only once the node has answered
//! - **Session**: request id sequence and last-exchange cache shared between clients
//! - **Invocation**: contract call or transaction description
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ethrpc_sdk::{abi::{AbiValue, ReturnKind}, Address, Client, Invocation};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::http("http://127.0.0.1:8545");
//!
//!     let contract = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!     let invocation = Invocation::new(contract, "double", "i")
//!         .param(AbiValue::int(21i64))
//!         .returns(ReturnKind::Int);
//!
//!     let outcome = client.invoke(&invocation).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Blocking Use
//!
//! ```rust
//! use ethrpc_sdk::{BlockingClient, Client};
//!
//! let client = BlockingClient::new(Client::new_mock())?;
//! let block = client.block_on(client.client().block_number())?;
//! assert_eq!(block, 256);
//! # Ok::<(), ethrpc_sdk::SdkError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod blocking;
mod client;
mod config;
mod error;
mod invoke;
pub mod rpc;
mod session;
mod transport;
pub mod types;

// Re-export main types
pub use blocking::BlockingClient;
pub use client::Client;
pub use config::ClientConfig;
pub use error::SdkError;
pub use invoke::Invocation;
pub use session::{LastExchange, Session};
pub use transport::{MockReply, MockTransport, MOCK_COINBASE};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use ethrpc_primitives::{Address, Gas, H256, U256};
