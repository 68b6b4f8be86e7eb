//! Contract invocation pipeline.
//!
//! Drives one contract method call end-to-end:
//! build → simulate → assemble → sign → submit → poll.
//!
//! Simulation is mandatory: the resource footprint and authorization
//! entries are backend-computed and unknowable client-side. Simulation
//! failures, submission rejections, and on-chain reverts are all
//! immediately terminal; the only built-in repetition is the read-only
//! confirmation poll.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use zkpay_common::{map_rpc_error, ContractErrorCode, Error, ErrorContext, Result};

use crate::backend::{LedgerBackend, TransactionSigner};
use crate::config::ClientConfig;
use crate::types::{
    AssembledTransaction, InvocationResult, Operation, SendResponse, SimulationResponse,
    TransactionHandle, UnsignedTransaction,
};
use crate::watcher::{poll_transaction, NoopObserver, PollOptions};

/// Capability for invoking contract methods.
///
/// Production clients and test doubles both implement this; consumers
/// depend on the capability, not on a concrete client type.
#[async_trait]
pub trait ContractInvoker: Send + Sync {
    /// Execute one method call end-to-end and return its decoded result.
    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<InvocationResult>;
}

/// Production contract client. One invocation request produces exactly one
/// on-chain transaction attempt.
pub struct ContractClient {
    backend: Arc<dyn LedgerBackend>,
    signer: Arc<dyn TransactionSigner>,
    config: ClientConfig,
}

impl ContractClient {
    pub fn new(
        backend: Arc<dyn LedgerBackend>,
        signer: Arc<dyn TransactionSigner>,
        config: ClientConfig,
    ) -> Self {
        Self {
            backend,
            signer,
            config,
        }
    }

    fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_secs(self.config.poll_interval_secs),
            max_polls: self.config.max_polls,
        }
    }

    async fn invoke_inner(&self, method: &str, args: Vec<Value>) -> Result<InvocationResult> {
        // BUILDING
        debug!(method, contract_id = %self.config.contract_id, "building transaction");
        let account = self.backend.get_account(self.signer.account_id()).await?;
        let tx = UnsignedTransaction {
            source: account.account_id,
            sequence: account.sequence + 1,
            operation: Operation {
                contract_id: self.config.contract_id.clone(),
                method: method.to_string(),
                args,
            },
            timeout_secs: self.config.tx_timeout_secs,
            network: self.config.network.clone(),
        };

        // SIMULATING
        debug!(method, "simulating transaction");
        let simulation = match self.backend.simulate_transaction(&tx).await? {
            SimulationResponse::Success(data) => data,
            SimulationResponse::Failure { error } => {
                return Err(Error::contract(
                    ContractErrorCode::SimulationFailed,
                    format!("simulation of {method} failed: {error}"),
                ));
            }
        };

        // ASSEMBLING: merge the simulation's footprint and authorizations
        // back into the transaction.
        let assembled = AssembledTransaction {
            footprint: simulation.footprint,
            auth: simulation.auth,
            resource_fee: simulation.min_resource_fee,
            tx,
        };

        // SIGNING: local, infallible.
        let signed = self.signer.sign(&assembled);

        // SUBMITTING: a backend-reported rejection means a malformed or
        // invalid transaction, not a transient condition.
        debug!(method, "submitting transaction");
        let hash = match self.backend.send_transaction(&signed).await? {
            SendResponse::Accepted { hash } => hash,
            SendResponse::Rejected { error_detail } => {
                return Err(Error::contract(
                    ContractErrorCode::SubmissionFailed,
                    format!("submission of {method} rejected: {error_detail}"),
                ));
            }
        };
        info!(method, tx_hash = %hash, "transaction submitted");

        // POLLING
        let handle = TransactionHandle {
            hash: hash.clone(),
            network: self.config.network.clone(),
        };
        let confirmation =
            poll_transaction(self.backend.as_ref(), &handle, &self.poll_options(), &NoopObserver)
                .await?;

        // A successful call may legitimately return nothing; synthesize the
        // canonical void value rather than treating absence as an error.
        let return_value = confirmation.return_value.unwrap_or(Value::Null);
        info!(method, tx_hash = %hash, ledger = ?confirmation.ledger, "invocation confirmed");
        Ok(InvocationResult {
            tx_hash: hash,
            ledger: confirmation.ledger,
            return_value,
        })
    }
}

#[async_trait]
impl ContractInvoker for ContractClient {
    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<InvocationResult> {
        let context = ErrorContext::new()
            .with("contract_id", &self.config.contract_id)
            .with("method", method)
            .with("network", &self.config.network);
        // Callers only ever observe the closed taxonomy: anything that is
        // not already a typed contract execution error gets classified here.
        self.invoke_inner(method, args)
            .await
            .map_err(|err| map_rpc_error(err, &context))
    }
}
