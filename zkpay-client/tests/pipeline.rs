//! Contract invocation pipeline behavior against a scripted ledger.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::{json, Value};
use zkpay_client::{ClientConfig, ContractClient, ContractInvoker, TransactionStatus};
use zkpay_common::Error;

use common::{MockLedger, StaticSigner};

fn client(ledger: Arc<MockLedger>, max_polls: u32) -> ContractClient {
    let mut config = ClientConfig::new("testnet", "CONTRACT-1");
    config.poll_interval_secs = 0;
    config.max_polls = max_polls;
    ContractClient::new(ledger, Arc::new(StaticSigner::new()), config)
}

#[tokio::test]
async fn confirmed_invocation_returns_the_decoded_value() {
    let ledger = Arc::new(MockLedger::new().with_statuses(vec![
        TransactionStatus::NotFound,
        TransactionStatus::Success {
            ledger: 7,
            return_value: Some(json!({ "ok": true })),
        },
    ]));
    let client = client(Arc::clone(&ledger), 5);

    let result = client.invoke("pay", vec![json!("arg")]).await.unwrap();

    assert_eq!(result.tx_hash, "abc");
    assert_eq!(result.ledger, Some(7));
    assert_eq!(result.return_value, json!({ "ok": true }));
    assert_eq!(ledger.get_account_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.simulate_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.send_count(), 1);
    assert_eq!(ledger.status_count(), 2);
}

#[tokio::test]
async fn void_return_is_synthesized_as_null() {
    let ledger = Arc::new(MockLedger::new().with_statuses(vec![TransactionStatus::Success {
        ledger: 3,
        return_value: None,
    }]));
    let client = client(ledger, 5);

    let result = client.invoke("pay", vec![]).await.unwrap();
    assert_eq!(result.return_value, Value::Null);
}

#[tokio::test]
async fn simulation_failure_is_terminal_and_never_submits() {
    let ledger = Arc::new(MockLedger::new().with_simulation_failure("footprint too large"));
    let client = client(Arc::clone(&ledger), 5);

    let err = client.invoke("pay", vec![]).await.unwrap_err();

    assert_eq!(err.code(), "SIMULATION_FAILED");
    assert!(err.to_string().contains("footprint too large"));
    assert_eq!(ledger.simulate_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.send_count(), 0);
    assert_eq!(ledger.status_count(), 0);
}

#[tokio::test]
async fn rejected_submission_is_terminal() {
    let ledger = Arc::new(MockLedger::new().with_send_rejection("malformed envelope"));
    let client = client(Arc::clone(&ledger), 5);

    let err = client.invoke("pay", vec![]).await.unwrap_err();

    assert_eq!(err.code(), "TRANSACTION_SUBMISSION_FAILED");
    assert!(err.to_string().contains("malformed envelope"));
    assert_eq!(ledger.send_count(), 1);
    assert_eq!(ledger.status_count(), 0);
}

#[tokio::test]
async fn on_chain_failure_surfaces_as_revert() {
    let ledger = Arc::new(MockLedger::new().with_statuses(vec![TransactionStatus::Failed {
        result_meta: Some("wasm vm trapped".into()),
    }]));
    let client = client(ledger, 5);

    let err = client.invoke("pay", vec![]).await.unwrap_err();

    assert_eq!(err.code(), "CONTRACT_REVERT");
    assert!(err.to_string().contains("wasm vm trapped"));
}

#[tokio::test]
async fn exhausted_polls_surface_as_timeout() {
    // Status queue left empty: every poll reports NotFound.
    let ledger = Arc::new(MockLedger::new());
    let client = client(Arc::clone(&ledger), 3);

    let err = client.invoke("pay", vec![]).await.unwrap_err();

    assert_eq!(err.code(), "TRANSACTION_TIMEOUT");
    assert_eq!(ledger.status_count(), 3);
}

#[tokio::test]
async fn untyped_backend_errors_are_classified_with_call_context() {
    let ledger =
        Arc::new(MockLedger::new().with_account_error(Error::network("connection timeout")));
    let client = client(ledger, 5);

    let err = client.invoke("pay", vec![]).await.unwrap_err();

    assert_eq!(err.code(), "TRANSACTION_TIMEOUT");
    let context = err.context().expect("classified errors carry context");
    assert_eq!(context.get("contract_id"), Some("CONTRACT-1"));
    assert_eq!(context.get("method"), Some("pay"));
    assert_eq!(context.get("network"), Some("testnet"));
}
