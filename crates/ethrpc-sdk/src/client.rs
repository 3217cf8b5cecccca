//! Client - asynchronous RPC dispatch and contract invocation

use std::sync::Arc;

use ethrpc_primitives::{Address, H256, U256};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::abi::Calldata;
use crate::config::ClientConfig;
use crate::invoke::Invocation;
use crate::rpc::{normalize_params, Namespace, RpcOutcome};
use crate::session::Session;
use crate::transport::{MockTransport, Transport};
use crate::types::{BlockId, TransactionRequest};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// JSON-RPC client.
///
/// Cloning is cheap; clones share the transport and the [`Session`], so ids
/// stay unique across them.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    config: ClientConfig,
}

impl Client {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn http(url: &str) -> Self {
        Self::with_transport(HttpTransport::new(url))
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport and a fresh session
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            session: Arc::new(Session::new()),
            config: ClientConfig::default(),
        }
    }

    /// Use `session` for ids and the last-exchange cache
    pub fn with_session(mut self, session: Arc<Session>) -> Self {
        self.session = session;
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Session shared by this client
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `command` in `namespace` and classify the response.
    ///
    /// Error objects from the node come back as [`RpcOutcome::Failure`];
    /// only transport and decoding problems are returned as `Err`.
    pub async fn request(
        &self,
        namespace: Namespace,
        command: &str,
        params: Value,
    ) -> Result<RpcOutcome, SdkError> {
        let envelope = self
            .session
            .envelope(namespace.method(command), normalize_params(params));
        debug!("RPC request {} (id {})", envelope.method, envelope.id);

        let body = self.transport.send(serde_json::to_vec(&envelope)?).await?;
        let response: Value = serde_json::from_slice(&body)?;
        debug!("RPC response for id {}: {}", envelope.id, response);
        self.session.record_response(response.clone());

        let outcome = RpcOutcome::from_body(response)?;
        if let RpcOutcome::Failure(error) = &outcome {
            warn!(
                "RPC error from {}: {} - {}",
                envelope.method, error.code, error.message
            );
        }
        Ok(outcome)
    }

    /// Run [`request`](Self::request) on the ambient tokio runtime and hand
    /// the outcome to `continuation`.
    ///
    /// Spawned requests complete in no particular order. Panics when called
    /// outside a tokio runtime.
    pub fn spawn_request<F>(
        &self,
        namespace: Namespace,
        command: &str,
        params: Value,
        continuation: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<RpcOutcome, SdkError>) + Send + 'static,
    {
        let client = self.clone();
        let command = command.to_string();
        tokio::spawn(async move {
            continuation(client.request(namespace, &command, params).await);
        })
    }

    async fn eth(&self, command: &str, params: Value) -> Result<Value, SdkError> {
        self.request(Namespace::Eth, command, params)
            .await?
            .into_result(command)
    }

    // ==================== Node Info ====================

    /// Account the node mines to
    pub async fn coinbase(&self) -> Result<Address, SdkError> {
        let result = self.eth("coinbase", Value::Null).await?;
        Ok(Address::from_hex(as_str(&result)?)?)
    }

    /// Current gas price in wei
    pub async fn gas_price(&self) -> Result<u128, SdkError> {
        let result = self.eth("gasPrice", Value::Null).await?;
        parse_hex_u128(as_str(&result)?)
    }

    /// Current block number
    pub async fn block_number(&self) -> Result<u64, SdkError> {
        let result = self.eth("blockNumber", Value::Null).await?;
        parse_hex_u64(as_str(&result)?)
    }

    /// Number of connected peers
    pub async fn peer_count(&self) -> Result<u64, SdkError> {
        let result = self
            .request(Namespace::Net, "peerCount", Value::Null)
            .await?
            .into_result("peerCount")?;
        parse_hex_u64(as_str(&result)?)
    }

    /// Keccak-256 of `data` computed by the node.
    ///
    /// With `short` set only the first four bytes are kept (`0x` + 8 digits).
    pub async fn sha3(&self, data: &[u8], short: bool) -> Result<String, SdkError> {
        let result = self
            .request(Namespace::Web3, "sha3", json!(format!("0x{}", hex::encode(data))))
            .await?
            .into_result("sha3")?;
        let hash = as_str(&result)?;
        Ok(if short {
            hash.chars().take(10).collect()
        } else {
            hash.to_string()
        })
    }

    // ==================== Account Queries ====================

    /// Balance of `address` in wei
    pub async fn balance(&self, address: &Address, block: BlockId) -> Result<U256, SdkError> {
        let result = self
            .eth("getBalance", json!([address.to_hex(), block]))
            .await?;
        parse_hex_u256(as_str(&result)?)
    }

    /// Number of transactions sent from `address`
    pub async fn tx_count(&self, address: &Address) -> Result<u64, SdkError> {
        let result = self
            .eth("getTransactionCount", json!([address.to_hex(), BlockId::Latest]))
            .await?;
        parse_hex_u64(as_str(&result)?)
    }

    /// Code deployed at `address`, `0x`-prefixed
    pub async fn read_code(&self, address: &Address, block: BlockId) -> Result<String, SdkError> {
        let result = self.eth("getCode", json!([address.to_hex(), block])).await?;
        Ok(as_str(&result)?.to_string())
    }

    // ==================== Transactions ====================

    /// Transaction by hash; `None` when the node does not know it
    pub async fn get_tx(&self, hash: &H256) -> Result<Option<Value>, SdkError> {
        match self
            .request(Namespace::Eth, "getTransactionByHash", json!(hash.to_hex()))
            .await?
        {
            RpcOutcome::Success(tx) => Ok(Some(tx)),
            RpcOutcome::Bare(_) => Ok(None),
            RpcOutcome::Failure(e) => Err(SdkError::Rpc {
                code: e.code,
                message: e.message,
            }),
        }
    }

    /// Execute `tx` without creating a transaction (`eth_call`)
    pub async fn call(&self, tx: &TransactionRequest) -> Result<RpcOutcome, SdkError> {
        let tx = tx.with_default_gas(self.config.default_gas);
        self.request(Namespace::Eth, "call", json!([tx, BlockId::Latest]))
            .await
    }

    /// Submit `tx` for inclusion (`eth_sendTransaction`)
    pub async fn send_tx(&self, tx: &TransactionRequest) -> Result<RpcOutcome, SdkError> {
        let tx = tx.with_default_gas(self.config.default_gas);
        self.request(Namespace::Eth, "sendTransaction", json!([tx])).await
    }

    /// Transfer `value` wei to `to`
    pub async fn pay(
        &self,
        from: Option<Address>,
        to: Address,
        value: U256,
    ) -> Result<RpcOutcome, SdkError> {
        let tx = TransactionRequest {
            from: Some(self.resolve_sender(from).await?),
            to: Some(to),
            value: Some(value),
            ..Default::default()
        };
        self.send_tx(&tx).await
    }

    /// Deploy compiled `bytecode` from the coinbase account
    pub async fn publish(&self, bytecode: &str) -> Result<RpcOutcome, SdkError> {
        let tx = TransactionRequest {
            from: Some(self.coinbase().await?),
            data: Some(bytecode.to_string()),
            ..Default::default()
        };
        self.send_tx(&tx).await
    }

    // ==================== Session ====================

    /// Id of the last envelope built
    pub fn last_id(&self) -> Option<u64> {
        self.session.last_request().map(|envelope| envelope.id)
    }

    /// Last envelope built
    pub fn last_request(&self) -> Option<crate::rpc::RpcEnvelope> {
        self.session.last_request()
    }

    // ==================== Contract Invocation ====================

    /// Encoded calldata for `invocation`
    pub fn invocation_data(&self, invocation: &Invocation) -> Result<Calldata, SdkError> {
        invocation.calldata(&self.config.encoding)
    }

    /// Encode and dispatch `invocation` as `eth_call` or
    /// `eth_sendTransaction`.
    ///
    /// Encoding errors are returned before anything is sent. The result is
    /// returned unformatted.
    pub async fn invoke(&self, invocation: &Invocation) -> Result<RpcOutcome, SdkError> {
        let data = self.invocation_data(invocation)?;
        let from = self.resolve_sender(invocation.from).await?;
        let tx = invocation.transaction(from, data);
        debug!(
            "Invoking {}({}) send={}",
            invocation.function, invocation.signature, invocation.send
        );
        if invocation.send {
            self.send_tx(&tx).await
        } else {
            self.call(&tx).await
        }
    }

    /// Run [`invoke`](Self::invoke) on the ambient tokio runtime and hand
    /// the outcome to `continuation`
    pub fn spawn_invoke<F>(&self, invocation: Invocation, continuation: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<RpcOutcome, SdkError>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            continuation(client.invoke(&invocation).await);
        })
    }

    async fn resolve_sender(&self, explicit: Option<Address>) -> Result<Address, SdkError> {
        if let Some(from) = explicit.or(self.config.primary_account) {
            return Ok(from);
        }
        self.coinbase()
            .await
            .map_err(|e| SdkError::NoSender(e.to_string()))
    }
}

// ==================== Helper Functions ====================

fn as_str(value: &Value) -> Result<&str, SdkError> {
    value
        .as_str()
        .ok_or_else(|| SdkError::Serialization(format!("expected a string, got {}", value)))
}

fn parse_hex_u64(s: &str) -> Result<u64, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| SdkError::InvalidHex(e.to_string()))
}

fn parse_hex_u128(s: &str) -> Result<u128, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(s, 16).map_err(|e| SdkError::InvalidHex(e.to_string()))
}

fn parse_hex_u256(s: &str) -> Result<U256, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    U256::from_str_radix(s, 16).map_err(|e| SdkError::InvalidHex(e.to_string()))
}
