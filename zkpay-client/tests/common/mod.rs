//! Scripted test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use zkpay_client::{
    AccountState, AssembledTransaction, ConfirmationObserver, ConfirmationResult, LedgerBackend,
    SendResponse, SignedTransaction, SimulationData, SimulationResponse, TransactionSigner,
    TransactionStatus, UnsignedTransaction,
};
use zkpay_common::{Error, Result};

/// Ledger backend with scripted responses and call counters.
pub struct MockLedger {
    pub account: AccountState,
    pub simulation: SimulationResponse,
    pub send_response: SendResponse,
    statuses: Mutex<VecDeque<TransactionStatus>>,
    account_error: Mutex<Option<Error>>,
    status_error: Mutex<Option<Error>>,
    pub get_account_calls: AtomicU32,
    pub simulate_calls: AtomicU32,
    pub send_calls: AtomicU32,
    pub status_calls: AtomicU32,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            account: AccountState {
                account_id: "G-SOURCE".into(),
                sequence: 41,
            },
            simulation: SimulationResponse::Success(SimulationData {
                footprint: json!({ "read": ["ledger-entry"] }),
                auth: vec![json!("auth-entry")],
                min_resource_fee: 100,
            }),
            send_response: SendResponse::Accepted { hash: "abc".into() },
            statuses: Mutex::new(VecDeque::new()),
            account_error: Mutex::new(None),
            status_error: Mutex::new(None),
            get_account_calls: AtomicU32::new(0),
            simulate_calls: AtomicU32::new(0),
            send_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
        }
    }

    /// Queue the status snapshots returned by successive polls; once the
    /// queue drains, every further poll reports `NotFound`.
    pub fn with_statuses(self, statuses: Vec<TransactionStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_simulation_failure(mut self, error: &str) -> Self {
        self.simulation = SimulationResponse::Failure {
            error: error.into(),
        };
        self
    }

    pub fn with_send_rejection(mut self, detail: &str) -> Self {
        self.send_response = SendResponse::Rejected {
            error_detail: detail.into(),
        };
        self
    }

    /// Fail the next `get_account` with this error.
    pub fn with_account_error(self, error: Error) -> Self {
        *self.account_error.lock().unwrap() = Some(error);
        self
    }

    /// Fail the next `get_transaction` with this error.
    pub fn with_status_error(self, error: Error) -> Self {
        *self.status_error.lock().unwrap() = Some(error);
        self
    }

    pub fn send_count(&self) -> u32 {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn status_count(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerBackend for MockLedger {
    async fn get_account(&self, _account_id: &str) -> Result<AccountState> {
        self.get_account_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.account_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.account.clone())
    }

    async fn simulate_transaction(&self, _tx: &UnsignedTransaction) -> Result<SimulationResponse> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.simulation.clone())
    }

    async fn send_transaction(&self, _tx: &SignedTransaction) -> Result<SendResponse> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.send_response.clone())
    }

    async fn get_transaction(&self, _hash: &str) -> Result<TransactionStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.status_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TransactionStatus::NotFound))
    }
}

/// Signer that stamps a deterministic envelope.
pub struct StaticSigner {
    pub account: String,
}

impl StaticSigner {
    pub fn new() -> Self {
        Self {
            account: "G-SOURCE".into(),
        }
    }
}

impl TransactionSigner for StaticSigner {
    fn account_id(&self) -> &str {
        &self.account
    }

    fn sign(&self, tx: &AssembledTransaction) -> SignedTransaction {
        SignedTransaction {
            envelope: format!("signed:{}:{}", tx.tx.source, tx.tx.operation.method),
            source: tx.tx.source.clone(),
            network: tx.tx.network.clone(),
        }
    }
}

/// Observer that records every notification.
#[derive(Default)]
pub struct RecordingObserver {
    pub attempts: Mutex<Vec<(u32, u32)>>,
    pub confirmed: Mutex<Vec<ConfirmationResult>>,
    pub timeouts: Mutex<Vec<u32>>,
    pub errors: AtomicU32,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed.lock().unwrap().len()
    }
}

impl ConfirmationObserver for RecordingObserver {
    fn on_attempt(&self, attempt: u32, max_polls: u32) {
        self.attempts.lock().unwrap().push((attempt, max_polls));
    }

    fn on_confirmed(&self, result: &ConfirmationResult) {
        self.confirmed.lock().unwrap().push(result.clone());
    }

    fn on_timeout(&self, attempts: u32) {
        self.timeouts.lock().unwrap().push(attempts);
    }

    fn on_error(&self, _error: &Error) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}
