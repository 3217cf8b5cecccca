//! Blocking wrapper around [`Client`]

use std::future::Future;

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::abi::{format_result, Calldata, Formatted};
use crate::client::Client;
use crate::invoke::Invocation;
use crate::rpc::{Namespace, RpcOutcome};
use crate::SdkError;

/// Client whose calls return only after the transport has completed.
///
/// Owns a current-thread runtime, so it must not be used from inside an
/// async context.
pub struct BlockingClient {
    inner: Client,
    runtime: Runtime,
}

impl BlockingClient {
    /// Wrap `client`
    pub fn new(client: Client) -> Result<Self, SdkError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SdkError::Runtime(e.to_string()))?;
        Ok(Self {
            inner: client,
            runtime,
        })
    }

    /// Blocking client over HTTP
    #[cfg(feature = "http")]
    pub fn http(url: &str) -> Result<Self, SdkError> {
        Self::new(Client::http(url))
    }

    /// Underlying asynchronous client
    pub fn client(&self) -> &Client {
        &self.inner
    }

    /// Drive `future` to completion, e.g. one of the [`Client`] node queries
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Blocking [`Client::request`]
    pub fn request(
        &self,
        namespace: Namespace,
        command: &str,
        params: Value,
    ) -> Result<RpcOutcome, SdkError> {
        self.block_on(self.inner.request(namespace, command, params))
    }

    /// Encoded calldata for `invocation`
    pub fn invocation_data(&self, invocation: &Invocation) -> Result<Calldata, SdkError> {
        self.inner.invocation_data(invocation)
    }

    /// Blocking [`Client::invoke`]; the result is formatted when
    /// `invocation.returns` is set
    pub fn invoke(&self, invocation: &Invocation) -> Result<RpcOutcome<Formatted>, SdkError> {
        let outcome = self.block_on(self.inner.invoke(invocation))?;
        Ok(outcome.map(|raw| match invocation.returns {
            Some(kind) => format_result(kind, raw),
            None => Formatted::Raw(raw),
        }))
    }
}
