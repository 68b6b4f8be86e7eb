//! Proof payload shaped for on-chain verification.

use serde::{Deserialize, Serialize};

/// Proof points as returned by the proving backend, in its native
/// coordinate order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProof {
    pub pi_a: [String; 2],
    pub pi_b: [[String; 2]; 2],
    pub pi_c: [String; 2],
    pub protocol: String,
    pub curve: String,
}

/// Full output of one proving call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProverOutput {
    pub proof: RawProof,
    pub public_signals: Vec<String>,
}

/// Immutable proof payload with `pi_b` stored in the coordinate order the
/// verifying contract expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload {
    pub pi_a: [String; 2],
    pub pi_b: [[String; 2]; 2],
    pub pi_c: [String; 2],
    pub protocol: String,
    pub curve: String,
    /// Ordered public signals, as decimal strings.
    pub public_signals: Vec<String>,
}

impl ProofPayload {
    /// Build a payload from prover-native output.
    ///
    /// The backend returns each `pi_b` row in its native order; the
    /// verifying contract expects the row swapped, so `[a, b]` is stored as
    /// `[b, a]`.
    pub fn from_raw(raw: RawProverOutput) -> Self {
        let RawProverOutput {
            proof,
            public_signals,
        } = raw;
        Self {
            pi_a: proof.pi_a,
            pi_b: proof.pi_b.map(|[a, b]| [b, a]),
            pi_c: proof.pi_c,
            protocol: proof.protocol,
            curve: proof.curve,
            public_signals,
        }
    }
}
