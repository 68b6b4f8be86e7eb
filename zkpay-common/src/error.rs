//! Error taxonomy for the zkpay payment client.
//!
//! Every component surfaces failures through this closed set of kinds.
//! Boundary call sites classify their own backend errors; no raw transport
//! or prover exception crosses a crate boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias used across the zkpay crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Sub-codes for contract execution failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractErrorCode {
    /// The dry run of the built transaction reported an error.
    SimulationFailed,
    /// The backend rejected the signed transaction at submission.
    SubmissionFailed,
    /// The poll budget ran out before a terminal status appeared.
    Timeout,
    /// The transaction carried an insufficient fee.
    InsufficientFee,
    /// The transaction reached the chain and reverted.
    Revert,
    /// Backend error that matched no known category.
    UnknownRpc,
}

impl ContractErrorCode {
    /// Stable machine-readable code suitable for programmatic branching.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractErrorCode::SimulationFailed => "SIMULATION_FAILED",
            ContractErrorCode::SubmissionFailed => "TRANSACTION_SUBMISSION_FAILED",
            ContractErrorCode::Timeout => "TRANSACTION_TIMEOUT",
            ContractErrorCode::InsufficientFee => "INSUFFICIENT_FEE",
            ContractErrorCode::Revert => "CONTRACT_REVERT",
            ContractErrorCode::UnknownRpc => "UNKNOWN_RPC_ERROR",
        }
    }
}

impl fmt::Display for ContractErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure cases for the cache layer, one coherent enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheErrorCode {
    /// The storage medium could not be prepared at construction time.
    Unavailable,
    /// A read on an otherwise-available medium failed.
    ReadFailed,
    /// A write (or eviction) on an otherwise-available medium failed.
    WriteFailed,
}

impl CacheErrorCode {
    /// Stable machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheErrorCode::Unavailable => "CACHE_UNAVAILABLE",
            CacheErrorCode::ReadFailed => "CACHE_READ_FAILED",
            CacheErrorCode::WriteFailed => "CACHE_WRITE_FAILED",
        }
    }
}

impl fmt::Display for CacheErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open diagnostic context attached to errors.
///
/// Carries identifiers such as the transaction hash, contract id, and
/// network for observability. Never consulted for control flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext(BTreeMap<String, String>);

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one diagnostic entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Closed error taxonomy for the payment client.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure reaching a backend.
    #[error("network error: {message}")]
    Network {
        message: String,
        /// HTTP status, when the transport produced one.
        status: Option<u16>,
        context: ErrorContext,
    },

    /// The proving backend or an artifact download failed.
    #[error("proof generation failed: {message}")]
    ProofGeneration { message: String, context: ErrorContext },

    /// A contract invocation failed with a classified sub-code.
    #[error("contract execution failed ({code}): {message}")]
    ContractExecution {
        code: ContractErrorCode,
        message: String,
        context: ErrorContext,
    },

    /// Caller-supplied input failed a business rule.
    #[error("invalid {field}: {message}")]
    Validation {
        /// The offending input field.
        field: String,
        code: &'static str,
        message: String,
    },

    /// Cache layer failure.
    #[error("cache error ({code}): {message}")]
    Cache { code: CacheErrorCode, message: String },
}

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Error::Network {
            message: message.into(),
            status: None,
            context: ErrorContext::new(),
        }
    }

    pub fn network_with_status(message: impl Into<String>, status: u16) -> Self {
        Error::Network {
            message: message.into(),
            status: Some(status),
            context: ErrorContext::new(),
        }
    }

    pub fn proof_generation(message: impl Into<String>) -> Self {
        Error::ProofGeneration {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn contract(code: ContractErrorCode, message: impl Into<String>) -> Self {
        Error::ContractExecution {
            code,
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn validation(
        field: impl Into<String>,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    pub fn cache(code: CacheErrorCode, message: impl Into<String>) -> Self {
        Error::Cache {
            code,
            message: message.into(),
        }
    }

    /// Attach a diagnostic context, replacing any existing one.
    ///
    /// Validation and cache errors carry no context; for those this is a
    /// no-op.
    pub fn with_context(self, context: ErrorContext) -> Self {
        match self {
            Error::Network {
                message, status, ..
            } => Error::Network {
                message,
                status,
                context,
            },
            Error::ProofGeneration { message, .. } => Error::ProofGeneration { message, context },
            Error::ContractExecution { code, message, .. } => Error::ContractExecution {
                code,
                message,
                context,
            },
            other => other,
        }
    }

    /// Stable machine-readable code for every variant.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Network { .. } => "NETWORK_ERROR",
            Error::ProofGeneration { .. } => "PROOF_GENERATION_FAILED",
            Error::ContractExecution { code, .. } => code.as_str(),
            Error::Validation { code, .. } => code,
            Error::Cache { code, .. } => code.as_str(),
        }
    }

    /// Diagnostic context, when the variant carries one.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Network { context, .. }
            | Error::ProofGeneration { context, .. }
            | Error::ContractExecution { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// Classify an opaque backend error message into a contract error sub-code.
///
/// First match wins. Fee and timeout phrasing can overlap with submission
/// phrasing, so the more specific categories are checked first.
pub fn classify_rpc_message(message: &str) -> ContractErrorCode {
    let msg = message.to_ascii_lowercase();
    if msg.contains("simulat") {
        ContractErrorCode::SimulationFailed
    } else if msg.contains("fee") || msg.contains("insufficient") {
        ContractErrorCode::InsufficientFee
    } else if msg.contains("timeout") || msg.contains("expired") {
        ContractErrorCode::Timeout
    } else if msg.contains("revert") || msg.contains("trap") || msg.contains("wasm") {
        ContractErrorCode::Revert
    } else if msg.contains("submit") || msg.contains("send") {
        ContractErrorCode::SubmissionFailed
    } else {
        ContractErrorCode::UnknownRpc
    }
}

/// Map an error escaping the invocation pipeline into the closed taxonomy.
///
/// An already-typed contract execution error passes through unchanged;
/// everything else is classified by message content so callers only ever
/// observe `ContractExecution` errors from the pipeline.
pub fn map_rpc_error(err: Error, context: &ErrorContext) -> Error {
    if let Error::ContractExecution { .. } = err {
        return err;
    }
    let message = err.to_string();
    Error::ContractExecution {
        code: classify_rpc_message(&message),
        message,
        context: context.clone(),
    }
}
