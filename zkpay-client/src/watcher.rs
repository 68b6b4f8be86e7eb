//! Transaction confirmation polling.
//!
//! A standalone poller for tracking a transaction hash to a terminal ledger
//! state, usable independently of the invocation pipeline. The polling
//! policy is a fixed interval and a fixed attempt budget, with no backoff
//! or jitter; ledger finality windows are seconds, not minutes.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use zkpay_common::{ContractErrorCode, Error, ErrorContext, Result};

use crate::backend::LedgerBackend;
use crate::config::{DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_SECS};
use crate::types::{ConfirmationResult, ConfirmationStatus, TransactionHandle, TransactionStatus};

/// Per-watch polling policy.
#[derive(Clone, Copy, Debug)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

/// Side-channel notifications emitted while polling.
///
/// Purely observational: a caller that ignores every notification and only
/// awaits the final result or error sees identical outcomes. The terminal
/// result is always returned (or raised) directly, never delivered solely
/// through this channel.
pub trait ConfirmationObserver: Send + Sync {
    /// One poll attempt is about to query status.
    fn on_attempt(&self, _attempt: u32, _max_polls: u32) {}

    /// A terminal status was observed, success or failure.
    fn on_confirmed(&self, _result: &ConfirmationResult) {}

    /// The attempt budget ran out without a terminal status.
    fn on_timeout(&self, _attempts: u32) {}

    /// A status query failed hard; the loop aborts.
    fn on_error(&self, _error: &Error) {}
}

/// Observer that drops every notification.
pub struct NoopObserver;

impl ConfirmationObserver for NoopObserver {}

/// Standalone confirmation watcher. Stateless between calls; each watch
/// owns only its in-flight poll loop.
pub struct TransactionWatcher {
    backend: Arc<dyn LedgerBackend>,
    options: PollOptions,
}

impl TransactionWatcher {
    pub fn new(backend: Arc<dyn LedgerBackend>) -> Self {
        Self::with_options(backend, PollOptions::default())
    }

    pub fn with_options(backend: Arc<dyn LedgerBackend>, options: PollOptions) -> Self {
        Self { backend, options }
    }

    /// Poll with the watcher's configured policy and no observer.
    pub async fn watch(&self, handle: &TransactionHandle) -> Result<ConfirmationResult> {
        poll_transaction(self.backend.as_ref(), handle, &self.options, &NoopObserver).await
    }

    /// Poll with a per-call policy override and an observer.
    pub async fn watch_with(
        &self,
        handle: &TransactionHandle,
        options: &PollOptions,
        observer: &dyn ConfirmationObserver,
    ) -> Result<ConfirmationResult> {
        poll_transaction(self.backend.as_ref(), handle, options, observer).await
    }
}

/// Poll a transaction hash until a terminal state or the attempt budget
/// runs out. Each attempt sleeps the interval, then queries status once.
pub async fn poll_transaction(
    backend: &dyn LedgerBackend,
    handle: &TransactionHandle,
    options: &PollOptions,
    observer: &dyn ConfirmationObserver,
) -> Result<ConfirmationResult> {
    let context = ErrorContext::new()
        .with("tx_hash", &handle.hash)
        .with("network", &handle.network);

    for attempt in 1..=options.max_polls {
        tokio::time::sleep(options.interval).await;
        observer.on_attempt(attempt, options.max_polls);

        let status = match backend.get_transaction(&handle.hash).await {
            Ok(status) => status,
            // A hard query failure aborts the loop rather than silently
            // consuming the budget.
            Err(err) => {
                warn!(tx_hash = %handle.hash, attempt, "status query failed: {err}");
                observer.on_error(&err);
                return Err(err);
            }
        };

        match status {
            TransactionStatus::Success {
                ledger,
                return_value,
            } => {
                debug!(tx_hash = %handle.hash, ledger, attempt, "transaction confirmed");
                let result = ConfirmationResult {
                    status: ConfirmationStatus::Success,
                    ledger: Some(ledger),
                    return_value,
                };
                observer.on_confirmed(&result);
                return Ok(result);
            }
            TransactionStatus::Failed { result_meta } => {
                let result = ConfirmationResult {
                    status: ConfirmationStatus::Failed,
                    ledger: None,
                    return_value: None,
                };
                // The failure is reported to observers before the error is
                // raised: it is both an observable event and an exceptional
                // return.
                observer.on_confirmed(&result);
                let detail = result_meta.unwrap_or_else(|| "no result metadata".to_string());
                return Err(Error::contract(
                    ContractErrorCode::Revert,
                    format!("transaction {} failed on-chain: {detail}", handle.hash),
                )
                .with_context(context));
            }
            TransactionStatus::NotFound => {
                debug!(
                    tx_hash = %handle.hash,
                    attempt,
                    max_polls = options.max_polls,
                    "transaction not yet found"
                );
            }
        }
    }

    observer.on_timeout(options.max_polls);
    Err(Error::contract(
        ContractErrorCode::Timeout,
        format!(
            "transaction {} not confirmed after {} attempts",
            handle.hash, options.max_polls
        ),
    )
    .with_context(context))
}
