//! zkpay-prover
//!
//! Turns a payment witness into a verifier-shaped proof payload.
//!
//! The proving library itself is an external collaborator behind
//! [`ProverBackend`]; this crate owns what surrounds it: downloading and
//! memoizing proving artifacts, memoizing proof results under a
//! deterministic witness key, and classifying backend failures into the
//! shared error taxonomy.

pub mod artifacts;
pub mod cache;
pub mod generator;

pub use artifacts::{ArtifactFetcher, ArtifactKind, FetchTimeouts};
pub use cache::{Cache, FileCache, MemoryCache};
pub use generator::{ArtifactUrls, ProofGenerator, ProofProvider, ProverBackend, ProvingArtifacts};
