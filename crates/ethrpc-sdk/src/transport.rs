//! Transport layer for RPC communication

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::rpc::{RpcEnvelope, JSONRPC_VERSION};
use crate::SdkError;

/// Moves serialized requests to a node and returns the raw response body.
///
/// Connection handling, TLS, framing and timeouts all live behind this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request body and return the response body
    async fn send(&self, request: Vec<u8>) -> Result<Vec<u8>, SdkError>;
}

/// Scripted reply of the mock transport
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with `result`
    Result(Value),
    /// Respond with an `error` object
    Error {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
    /// Respond with this exact body
    Body(Value),
}

/// Mock transport for testing.
///
/// Clones share scripted replies and the request log.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    default_responses: Arc<HashMap<String, MockReply>>,
    requests: Arc<Mutex<Vec<RpcEnvelope>>>,
    offline: Arc<Mutex<bool>>,
}

/// Account returned by the mock for `eth_coinbase`
pub const MOCK_COINBASE: &str = "0x1111111111111111111111111111111111111111";

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        let mut result = |method: &str, value: &str| {
            defaults.insert(method.to_string(), MockReply::Result(Value::String(value.to_string())));
        };

        result("eth_coinbase", MOCK_COINBASE);
        result("eth_gasPrice", "0x3b9aca00"); // 1 gwei
        result("eth_blockNumber", "0x100");
        result("eth_getBalance", "0xde0b6b3a7640000"); // 10^18 wei
        result("eth_getTransactionCount", "0x0");
        result("eth_call", "0x");
        result("eth_sendTransaction", "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b");
        result("eth_getCode", "0x");
        result("net_peerCount", "0x2");
        result("web3_clientVersion", "ethrpc-mock/0.1.0");

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(defaults),
            requests: Arc::new(Mutex::new(Vec::new())),
            offline: Arc::new(Mutex::new(false)),
        }
    }

    /// Set a mock result for a specific method
    pub fn set_response(&self, method: &str, result: Value) {
        self.set_reply(method, MockReply::Result(result));
    }

    /// Make a specific method answer with an error object
    pub fn set_error(&self, method: &str, code: i64, message: &str) {
        self.set_reply(
            method,
            MockReply::Error {
                code,
                message: message.to_string(),
            },
        );
    }

    /// Set any scripted reply for a method
    pub fn set_reply(&self, method: &str, reply: MockReply) {
        self.responses.lock().insert(method.to_string(), reply);
    }

    /// Clear custom responses
    pub fn clear_responses(&self) {
        self.responses.lock().clear();
    }

    /// Simulate a transport failure on every send
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    /// Every envelope received so far
    pub fn requests(&self) -> Vec<RpcEnvelope> {
        self.requests.lock().clone()
    }

    /// Most recent envelope received
    pub fn last_request(&self) -> Option<RpcEnvelope> {
        self.requests.lock().last().cloned()
    }

    fn reply_for(&self, envelope: &RpcEnvelope) -> MockReply {
        if let Some(reply) = self.responses.lock().get(&envelope.method).cloned() {
            return reply;
        }
        if envelope.method == "web3_sha3" {
            return sha3_reply(&envelope.params);
        }
        self.default_responses
            .get(&envelope.method)
            .cloned()
            .unwrap_or_else(|| MockReply::Error {
                code: -32601,
                message: format!("Method not found: {}", envelope.method),
            })
    }
}

fn sha3_reply(params: &[Value]) -> MockReply {
    let data = params
        .first()
        .and_then(Value::as_str)
        .map(|s| s.strip_prefix("0x").unwrap_or(s))
        .and_then(|s| hex::decode(s).ok());
    match data {
        Some(bytes) => MockReply::Result(Value::String(ethrpc_crypto::keccak256(&bytes).to_hex())),
        None => MockReply::Error {
            code: -32602,
            message: "invalid params".to_string(),
        },
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Vec<u8>) -> Result<Vec<u8>, SdkError> {
        if *self.offline.lock() {
            return Err(SdkError::Transport("connection refused".to_string()));
        }

        let envelope: RpcEnvelope = serde_json::from_slice(&request)?;
        let reply = self.reply_for(&envelope);
        let id = envelope.id;
        self.requests.lock().push(envelope);

        let body = match reply {
            MockReply::Result(result) => json!({
                "id": id,
                "jsonrpc": JSONRPC_VERSION,
                "result": result,
            }),
            MockReply::Error { code, message } => json!({
                "id": id,
                "jsonrpc": JSONRPC_VERSION,
                "error": { "code": code, "message": message },
            }),
            MockReply::Body(body) => body,
        };
        Ok(serde_json::to_vec(&body)?)
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Create an HTTP transport whose requests give up after `timeout`
    pub fn with_timeout(url: &str, timeout: std::time::Duration) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Vec<u8>) -> Result<Vec<u8>, SdkError> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: u64, method: &str, params: Vec<Value>) -> Vec<u8> {
        serde_json::to_vec(&RpcEnvelope {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        })
        .unwrap()
    }

    async fn roundtrip(transport: &MockTransport, method: &str, params: Vec<Value>) -> Value {
        let body = transport.send(request(7, method, params)).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_mock_transport_default_responses() {
        let transport = MockTransport::new();
        let body = roundtrip(&transport, "eth_gasPrice", vec![]).await;
        assert_eq!(body["result"], "0x3b9aca00");
        assert_eq!(body["id"], 7);
    }

    #[tokio::test]
    async fn test_mock_transport_custom_response() {
        let transport = MockTransport::new();
        transport.set_response("eth_blockNumber", Value::String("0x5".to_string()));
        let body = roundtrip(&transport, "eth_blockNumber", vec![]).await;
        assert_eq!(body["result"], "0x5");
    }

    #[tokio::test]
    async fn test_mock_transport_unknown_method() {
        let transport = MockTransport::new();
        let body = roundtrip(&transport, "unknown_method", vec![]).await;
        assert_eq!(body["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_mock_transport_sha3() {
        let transport = MockTransport::new();
        let body = roundtrip(&transport, "web3_sha3", vec![json!("0x68656c6c6f")]).await;
        assert_eq!(
            body["result"],
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new();
        let shared = transport.clone();
        roundtrip(&transport, "eth_call", vec![json!({"to": MOCK_COINBASE})]).await;
        let last = shared.last_request().unwrap();
        assert_eq!(last.method, "eth_call");
        assert_eq!(shared.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_offline() {
        let transport = MockTransport::new();
        transport.set_offline(true);
        let result = transport.send(request(1, "eth_call", vec![])).await;
        assert!(matches!(result, Err(SdkError::Transport(_))));
    }
}
