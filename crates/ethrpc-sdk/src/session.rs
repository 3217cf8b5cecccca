//! Request correlation state

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde_json::Value;

use crate::rpc::{RpcEnvelope, JSONRPC_VERSION};

/// Most recent request and response seen by a session
#[derive(Debug, Clone, Default)]
pub struct LastExchange {
    /// Last envelope built
    pub request: Option<RpcEnvelope>,
    /// Last response body received
    pub response: Option<Value>,
}

/// Owns the request id sequence and the last-exchange cache.
///
/// Clients sharing one session draw ids from one sequence, so concurrent
/// requests see interleaved but never repeated ids.
#[derive(Debug)]
pub struct Session {
    next_id: AtomicU64,
    last: Mutex<LastExchange>,
}

impl Session {
    /// Create a session whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a session whose first id is `first_id`
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            next_id: AtomicU64::new(first_id),
            last: Mutex::new(LastExchange::default()),
        }
    }

    /// Build an envelope with a fresh id and remember it as the last request
    pub fn envelope(&self, method: impl Into<String>, params: Vec<Value>) -> RpcEnvelope {
        let envelope = RpcEnvelope {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        };
        self.last.lock().request = Some(envelope.clone());
        envelope
    }

    /// Id the next envelope will get
    pub fn next_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Last envelope built
    pub fn last_request(&self) -> Option<RpcEnvelope> {
        self.last.lock().request.clone()
    }

    /// Last response body received
    pub fn last_response(&self) -> Option<Value> {
        self.last.lock().response.clone()
    }

    /// Snapshot of the last exchange
    pub fn last_exchange(&self) -> LastExchange {
        self.last.lock().clone()
    }

    pub(crate) fn record_response(&self, body: Value) {
        self.last.lock().response = Some(body);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
