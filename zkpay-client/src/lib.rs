//! zkpay-client
//!
//! Client pipeline for privacy-preserving payroll payments on a
//! smart-contract ledger:
//!
//! 1. Validate payment input (fail fast, no partial network calls)
//! 2. Generate a zero-knowledge proof for the payment witness
//! 3. Build, simulate, assemble, sign, and submit the contract call
//! 4. Poll the transaction to a terminal ledger state
//!
//! The ledger RPC layer and the proving library are external collaborators
//! behind the [`backend::LedgerBackend`] and `zkpay_prover::ProverBackend`
//! traits; the invocation state machine, the confirmation watcher, and the
//! payment orchestration all live here.

pub mod backend;
pub mod config;
pub mod payment;
pub mod pipeline;
pub mod types;
pub mod watcher;

pub use backend::{LedgerBackend, TransactionSigner};
pub use config::{
    ClientConfig, DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TX_TIMEOUT_SECS,
};
pub use payment::{PaymentOrchestrator, PaymentParams, PaymentResult, PAYMENT_METHOD};
pub use pipeline::{ContractClient, ContractInvoker};
pub use types::{
    AccountState, AssembledTransaction, ConfirmationResult, ConfirmationStatus, InvocationResult,
    Operation, SendResponse, SignedTransaction, SimulationData, SimulationResponse,
    TransactionHandle, TransactionStatus, UnsignedTransaction,
};
pub use watcher::{
    poll_transaction, ConfirmationObserver, NoopObserver, PollOptions, TransactionWatcher,
};
