//! Ledger backend and signer boundaries.

use async_trait::async_trait;
use zkpay_common::Result;

use crate::types::{
    AccountState, AssembledTransaction, SendResponse, SignedTransaction, SimulationResponse,
    TransactionStatus, UnsignedTransaction,
};

/// Operations the invocation pipeline requires from the ledger RPC layer.
///
/// Implementations classify their own transport failures into the error
/// taxonomy; no raw client error crosses this boundary.
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Fetch the current account/sequence state for a signer.
    async fn get_account(&self, account_id: &str) -> Result<AccountState>;

    /// Dry-run a built transaction to obtain its resource footprint and
    /// required authorization entries.
    async fn simulate_transaction(&self, tx: &UnsignedTransaction) -> Result<SimulationResponse>;

    /// Submit a signed transaction.
    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<SendResponse>;

    /// Query the status of a submitted transaction by hash.
    async fn get_transaction(&self, hash: &str) -> Result<TransactionStatus>;
}

/// Local signer for assembled transactions.
///
/// Signing is a pure local operation; malformed input is a programmer
/// error, not a runtime failure, so the signature is infallible.
pub trait TransactionSigner: Send + Sync {
    /// Identity of the signing account.
    fn account_id(&self) -> &str;

    fn sign(&self, tx: &AssembledTransaction) -> SignedTransaction;
}
