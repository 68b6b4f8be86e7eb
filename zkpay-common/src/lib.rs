//! Shared types for the zkpay payment client.
//!
//! This crate is the leaf of the workspace: the closed error taxonomy with
//! its RPC-message classifier, the proof witness with its deterministic
//! cache key, and the verifier-shaped proof payload.

pub mod error;
pub mod proof;
pub mod witness;

pub use error::{
    classify_rpc_message, map_rpc_error, CacheErrorCode, ContractErrorCode, Error, ErrorContext,
    Result,
};
pub use proof::{ProofPayload, RawProof, RawProverOutput};
pub use witness::{ProofWitness, SignalValue};
