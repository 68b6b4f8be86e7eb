//! Payment orchestration: validate, prove, invoke, shape the result.
//!
//! The only component with business validation rules. Validation happens
//! before any side effect; nothing here retries.

use std::sync::Arc;

use num_bigint::{BigInt, Sign};
use serde_json::Value;
use tracing::info;
use zkpay_common::{Error, ProofPayload, ProofWitness, Result};
use zkpay_prover::ProofProvider;

use crate::pipeline::ContractInvoker;

/// Contract method invoked for a payroll payment.
pub const PAYMENT_METHOD: &str = "pay";

/// One payroll payment request. Validated before any network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentParams {
    /// Recipient identifier.
    pub recipient: String,
    /// Amount in the asset's smallest unit.
    pub amount: BigInt,
    /// Asset identifier (e.g. "native").
    pub asset: String,
}

/// Outcome of a completed payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentResult {
    pub tx_hash: String,
    pub public_signals: Vec<String>,
}

/// Orchestrates one private payroll payment end to end: validate the
/// input, generate the proof, invoke the contract, wait for finality.
pub struct PaymentOrchestrator {
    prover: Arc<dyn ProofProvider>,
    invoker: Arc<dyn ContractInvoker>,
}

impl PaymentOrchestrator {
    pub fn new(prover: Arc<dyn ProofProvider>, invoker: Arc<dyn ContractInvoker>) -> Self {
        Self { prover, invoker }
    }

    pub async fn process_payment(&self, params: &PaymentParams) -> Result<PaymentResult> {
        validate(params)?;

        let witness = payment_witness(params);
        let proof = self.prover.generate_proof(&witness).await?;

        let args = payment_args(params, &proof)?;
        let invocation = self.invoker.invoke(PAYMENT_METHOD, args).await?;

        info!(
            tx_hash = %invocation.tx_hash,
            recipient = %params.recipient,
            asset = %params.asset,
            "payment confirmed"
        );
        Ok(PaymentResult {
            tx_hash: invocation.tx_hash,
            public_signals: proof.public_signals,
        })
    }
}

/// Ordered, short-circuiting validation. Runs before any side effect.
fn validate(params: &PaymentParams) -> Result<()> {
    if params.recipient.is_empty() {
        return Err(Error::validation(
            "recipient",
            "INVALID_RECIPIENT",
            "recipient must not be empty",
        ));
    }
    if params.amount.sign() != Sign::Plus {
        return Err(Error::validation(
            "amount",
            "INVALID_AMOUNT",
            "amount must be strictly positive",
        ));
    }
    if params.asset.is_empty() {
        return Err(Error::validation(
            "asset",
            "INVALID_ASSET",
            "asset must not be empty",
        ));
    }
    Ok(())
}

/// Witness the payment circuit expects, in signal order.
fn payment_witness(params: &PaymentParams) -> ProofWitness {
    ProofWitness::new()
        .with("recipient", params.recipient.as_str())
        .with("amount", params.amount.clone())
        .with("asset", params.asset.as_str())
}

/// Encode the call arguments with the provided codec.
fn payment_args(params: &PaymentParams, proof: &ProofPayload) -> Result<Vec<Value>> {
    let proof_value = serde_json::to_value(proof)
        .map_err(|e| Error::proof_generation(format!("proof payload encoding failed: {e}")))?;
    Ok(vec![
        proof_value,
        Value::String(params.recipient.clone()),
        Value::String(params.amount.to_str_radix(10)),
        Value::String(params.asset.clone()),
    ])
}
