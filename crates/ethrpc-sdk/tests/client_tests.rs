//! Client integration tests for ethrpc-sdk
//!
//! Tests request dispatch, response classification, node queries and
//! contract invocation against the mock transport.

use std::sync::Arc;

use ethrpc_sdk::abi::{AbiValue, ReturnKind};
use ethrpc_sdk::rpc::{Namespace, RpcOutcome};
use ethrpc_sdk::types::{BlockId, TransactionRequest};
use ethrpc_sdk::{
    Address, Client, ClientConfig, Invocation, MockReply, MockTransport, SdkError, Session, H256,
    MOCK_COINBASE, U256,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

fn contract() -> Address {
    Address::from_hex("0x742d35cc6634c0532925a3b844bc9e7595f0ab3d").unwrap()
}

fn mock_client() -> (Client, MockTransport) {
    let transport = MockTransport::new();
    (Client::with_transport(transport.clone()), transport)
}

// ==================== Dispatch Tests ====================

#[tokio::test]
async fn test_request_envelope_shape() {
    let (client, transport) = mock_client();
    client
        .request(Namespace::Net, "peerCount", Value::Null)
        .await
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.id, 1);
    assert_eq!(sent.jsonrpc, "2.0");
    assert_eq!(sent.method, "net_peerCount");
    assert!(sent.params.is_empty());
}

#[tokio::test]
async fn test_request_scalar_param_is_wrapped() {
    let (client, transport) = mock_client();
    client
        .request(Namespace::Eth, "getTransactionByHash", json!("0xabc"))
        .await
        .unwrap();
    assert_eq!(transport.last_request().unwrap().params, vec![json!("0xabc")]);
}

#[tokio::test]
async fn test_raw_namespace_uses_method_verbatim() {
    let (client, transport) = mock_client();
    transport.set_response("custom_method", json!(true));
    let outcome = client
        .request(Namespace::Raw, "custom_method", Value::Null)
        .await
        .unwrap();
    assert_eq!(outcome, RpcOutcome::Success(json!(true)));
}

#[tokio::test]
async fn test_remote_error_is_failure_not_err() {
    let (client, transport) = mock_client();
    transport.set_error("eth_call", -32000, "execution reverted");

    let outcome = client
        .request(Namespace::Eth, "call", json!([{}]))
        .await
        .unwrap();
    let error = outcome.failure().unwrap();
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "execution reverted");
}

#[tokio::test]
async fn test_loosely_shaped_error_is_failure() {
    let (client, transport) = mock_client();
    transport.set_reply(
        "eth_call",
        MockReply::Body(json!({"id": 1, "jsonrpc": "2.0", "error": "execution reverted"})),
    );
    transport.set_reply(
        "eth_estimateGas",
        MockReply::Body(json!({"id": 2, "jsonrpc": "2.0", "error": {"code": -32000}})),
    );

    let outcome = client
        .request(Namespace::Eth, "call", json!([{}]))
        .await
        .unwrap();
    assert_eq!(outcome.failure().unwrap().message, "execution reverted");

    let outcome = client
        .request(Namespace::Eth, "estimateGas", json!([{}]))
        .await
        .unwrap();
    assert_eq!(outcome.failure().unwrap().code, -32000);
}

#[tokio::test]
async fn test_bare_response_passes_through() {
    let (client, transport) = mock_client();
    let body = json!({"id": 1, "jsonrpc": "2.0", "note": "no result"});
    transport.set_reply("eth_syncing", MockReply::Body(body.clone()));

    let outcome = client
        .request(Namespace::Eth, "syncing", Value::Null)
        .await
        .unwrap();
    assert_eq!(outcome, RpcOutcome::Bare(body));
}

#[tokio::test]
async fn test_transport_failure_is_err() {
    let (client, transport) = mock_client();
    transport.set_offline(true);
    let result = client.request(Namespace::Eth, "blockNumber", Value::Null).await;
    assert!(matches!(result, Err(SdkError::Transport(_))));
}

#[tokio::test]
async fn test_shared_session_across_clients() {
    let session = Arc::new(Session::new());
    let a = Client::new_mock().with_session(session.clone());
    let b = Client::new_mock().with_session(session.clone());

    a.block_number().await.unwrap();
    b.block_number().await.unwrap();
    a.block_number().await.unwrap();

    assert_eq!(b.last_id(), Some(3));
    assert_eq!(session.next_id(), 4);
}

#[tokio::test]
async fn test_last_exchange_recorded() {
    let (client, _) = mock_client();
    client.gas_price().await.unwrap();

    let exchange = client.session().last_exchange();
    assert_eq!(exchange.request.unwrap().method, "eth_gasPrice");
    assert_eq!(exchange.response.unwrap()["result"], "0x3b9aca00");
}

#[tokio::test]
async fn test_spawn_request_calls_continuation() {
    let (client, _) = mock_client();
    let (tx, rx) = oneshot::channel();

    let handle = client.spawn_request(Namespace::Eth, "blockNumber", Value::Null, move |outcome| {
        let _ = tx.send(outcome);
    });
    handle.await.unwrap();

    let outcome = rx.await.unwrap().unwrap();
    assert_eq!(outcome.success(), Some(json!("0x100")));
}

#[tokio::test]
async fn test_spawned_requests_get_distinct_ids() {
    let (client, transport) = mock_client();
    let handles: Vec<_> = (0..8)
        .map(|_| client.spawn_request(Namespace::Eth, "blockNumber", Value::Null, |_| {}))
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let mut ids: Vec<u64> = transport.requests().iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}

// ==================== Node Query Tests ====================

#[tokio::test]
async fn test_balance_stays_in_wei() {
    let (client, transport) = mock_client();
    let balance = client.balance(&contract(), BlockId::Number(16)).await.unwrap();
    assert_eq!(balance, U256::from(1_000_000_000_000_000_000u128));
    assert_eq!(
        transport.last_request().unwrap().params,
        vec![json!("0x742d35cc6634c0532925a3b844bc9e7595f0ab3d"), json!("0x10")]
    );
}

#[tokio::test]
async fn test_tx_count_and_peer_count() {
    let (client, transport) = mock_client();
    transport.set_response("eth_getTransactionCount", json!("0x2a"));
    assert_eq!(client.tx_count(&contract()).await.unwrap(), 42);
    assert_eq!(client.peer_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_read_code() {
    let (client, transport) = mock_client();
    transport.set_response("eth_getCode", json!("0x6060"));
    let code = client.read_code(&contract(), BlockId::Latest).await.unwrap();
    assert_eq!(code, "0x6060");
}

#[tokio::test]
async fn test_get_tx_unknown_is_none() {
    let (client, transport) = mock_client();
    transport.set_response("eth_getTransactionByHash", Value::Null);
    assert!(client.get_tx(&H256::ZERO).await.unwrap().is_none());

    transport.set_response("eth_getTransactionByHash", json!({"nonce": "0x0"}));
    assert!(client.get_tx(&H256::ZERO).await.unwrap().is_some());
}

#[tokio::test]
async fn test_typed_query_surfaces_remote_error() {
    let (client, transport) = mock_client();
    transport.set_error("eth_blockNumber", -32603, "internal error");
    let result = client.block_number().await;
    assert!(matches!(result, Err(SdkError::Rpc { code: -32603, .. })));
}

#[tokio::test]
async fn test_sha3_full_and_short() {
    let (client, _) = mock_client();
    let full = client.sha3(b"hello", false).await.unwrap();
    assert_eq!(full.len(), 66);
    let short = client.sha3(b"hello", true).await.unwrap();
    assert_eq!(short, &full[..10]);
}

#[tokio::test]
async fn test_call_applies_default_gas() {
    let (client, transport) = mock_client();
    let tx = TransactionRequest {
        to: Some(contract()),
        data: Some("0x06661abd".to_string()),
        ..Default::default()
    };
    client.call(&tx).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, "eth_call");
    assert_eq!(sent.params[0]["gas"], "0x2dc6c0");
    assert_eq!(sent.params[1], "latest");
    assert!(tx.gas.is_none());
}

#[tokio::test]
async fn test_configured_default_gas() {
    let transport = MockTransport::new();
    let client = Client::with_transport(transport.clone())
        .with_config(ClientConfig::default().with_default_gas(21_000));
    client.send_tx(&TransactionRequest::default()).await.unwrap();
    assert_eq!(transport.last_request().unwrap().params[0]["gas"], "0x5208");
}

#[tokio::test]
async fn test_pay_defaults_to_coinbase() {
    let (client, transport) = mock_client();
    client
        .pay(None, contract(), U256::from(1000))
        .await
        .unwrap();

    let methods: Vec<String> = transport.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["eth_coinbase", "eth_sendTransaction"]);
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.params[0]["from"], MOCK_COINBASE);
    assert_eq!(sent.params[0]["value"], "0x3e8");
}

#[tokio::test]
async fn test_publish_sends_bytecode_without_recipient() {
    let (client, transport) = mock_client();
    client.publish("0x6060604052").await.unwrap();

    let tx = &transport.last_request().unwrap().params[0];
    assert_eq!(tx["data"], "0x6060604052");
    assert_eq!(tx["from"], MOCK_COINBASE);
    assert!(tx.get("to").is_none());
}

// ==================== Invocation Tests ====================

#[tokio::test]
async fn test_invoke_call_routing() {
    let (client, transport) = mock_client();
    let invocation = Invocation::new(contract(), "set", "i").param(AbiValue::int(7i64));
    client.invoke(&invocation).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, "eth_call");
    assert_eq!(
        sent.params[0]["data"],
        format!("0xe5c19b2d{:064x}", 7)
    );
    assert_eq!(sent.params[0]["to"], "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d");
}

#[tokio::test]
async fn test_invoke_send_routing() {
    let (client, transport) = mock_client();
    let sender = Address::from_bytes([0x22; 20]);
    let invocation = Invocation::new(contract(), "set", "i")
        .param(AbiValue::int(7i64))
        .sender(sender)
        .send();
    let outcome = client.invoke(&invocation).await.unwrap();
    assert!(outcome.success().is_some());

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "eth_sendTransaction");
    assert_eq!(sent[0].params[0]["from"], sender.to_hex());
}

#[tokio::test]
async fn test_invoke_sender_fallbacks() {
    let primary = Address::from_bytes([0x33; 20]);
    let transport = MockTransport::new();
    let client = Client::with_transport(transport.clone())
        .with_config(ClientConfig::default().with_primary_account(primary));
    client
        .invoke(&Invocation::new(contract(), "count", ""))
        .await
        .unwrap();
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(transport.last_request().unwrap().params[0]["from"], primary.to_hex());

    let (client, transport) = mock_client();
    client
        .invoke(&Invocation::new(contract(), "count", ""))
        .await
        .unwrap();
    assert_eq!(transport.requests()[0].method, "eth_coinbase");
    assert_eq!(transport.last_request().unwrap().params[0]["from"], MOCK_COINBASE);
}

#[tokio::test]
async fn test_invoke_without_any_sender() {
    let (client, transport) = mock_client();
    transport.set_error("eth_coinbase", -32000, "no coinbase");
    let result = client
        .invoke(&Invocation::new(contract(), "count", ""))
        .await;
    assert!(matches!(result, Err(SdkError::NoSender(_))));
}

#[tokio::test]
async fn test_invoke_validation_sends_nothing() {
    let (client, transport) = mock_client();
    let invocation = Invocation::new(contract(), "foo", "ii").param(AbiValue::int(1i64));
    let result = client.invoke(&invocation).await;

    assert!(matches!(
        result,
        Err(SdkError::WrongParamCount { expected: 2, got: 1 })
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_invoke_returns_raw_outcome() {
    let (client, transport) = mock_client();
    transport.set_response("eth_call", json!(format!("0x{:064x}", 5)));
    let invocation = Invocation::new(contract(), "getValue", "").returns(ReturnKind::Int);

    let outcome = client.invoke(&invocation).await.unwrap();
    assert_eq!(outcome, RpcOutcome::Success(json!(format!("0x{:064x}", 5))));
}

#[tokio::test]
async fn test_spawn_invoke() {
    let (client, transport) = mock_client();
    let (tx, rx) = oneshot::channel();
    let invocation = Invocation::new(contract(), "count", "").sender(Address::ZERO);

    client
        .spawn_invoke(invocation, move |outcome| {
            let _ = tx.send(outcome.map(|o| o.is_failure()));
        })
        .await
        .unwrap();

    assert!(!rx.await.unwrap().unwrap());
    assert_eq!(transport.last_request().unwrap().params[0]["data"], "0x6661abd");
}
