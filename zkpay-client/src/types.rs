//! Value types crossing the ledger backend boundary.
//!
//! Contract call arguments and decoded return values travel as
//! `serde_json::Value`; encoding domain values into the chain's wire format
//! is the job of a provided codec outside this crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Signer account state fetched at build time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub account_id: String,
    pub sequence: u64,
}

/// One contract method invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub contract_id: String,
    pub method: String,
    pub args: Vec<Value>,
}

/// Transaction built client-side, before simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub source: String,
    pub sequence: u64,
    /// Exactly one operation per transaction in this design.
    pub operation: Operation,
    /// Client-side timeout bound attached before submission.
    pub timeout_secs: u32,
    pub network: String,
}

/// Resource footprint and authorizations computed by simulation.
///
/// These are backend-computed and unknowable client-side, which is why
/// simulation is mandatory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationData {
    pub footprint: Value,
    pub auth: Vec<Value>,
    pub min_resource_fee: u64,
}

/// Outcome of a dry run against current ledger state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimulationResponse {
    Success(SimulationData),
    Failure { error: String },
}

/// Transaction with simulation output merged in, ready to sign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssembledTransaction {
    pub tx: UnsignedTransaction,
    pub footprint: Value,
    pub auth: Vec<Value>,
    pub resource_fee: u64,
}

/// Signed envelope ready for submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub envelope: String,
    pub source: String,
    pub network: String,
}

/// Backend response to a submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SendResponse {
    Accepted { hash: String },
    Rejected { error_detail: String },
}

/// Status snapshot for a submitted transaction. Non-terminal transactions
/// (pending or not yet visible) report `NotFound`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success {
        ledger: u64,
        return_value: Option<Value>,
    },
    Failed {
        result_meta: Option<String>,
    },
    NotFound,
}

/// A submitted transaction's identity: hash plus the network it went to.
///
/// Created on successful submission and never mutated; each poll produces a
/// fresh status snapshot keyed by the same hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    pub hash: String,
    pub network: String,
}

/// Terminal confirmation status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationStatus {
    Success,
    Failed,
}

/// Terminal outcome of a watched transaction. Produced exactly once per
/// watched transaction, never updated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationResult {
    pub status: ConfirmationStatus,
    pub ledger: Option<u64>,
    pub return_value: Option<Value>,
}

/// Result of one end-to-end contract invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub tx_hash: String,
    pub ledger: Option<u64>,
    /// Decoded return value; a successful call with no payload yields the
    /// canonical void value (`null`).
    pub return_value: Value,
}
