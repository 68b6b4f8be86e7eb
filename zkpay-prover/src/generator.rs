//! Proof generation with artifact and proof-result memoization.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zkpay_common::{Error, ProofPayload, ProofWitness, RawProverOutput, Result};

use crate::artifacts::{ArtifactFetcher, ArtifactKind};
use crate::cache::{Cache, MemoryCache};

/// Locations of the downloadable proving artifacts.
#[derive(Clone, Debug)]
pub struct ArtifactUrls {
    pub circuit: String,
    pub proving_key: String,
}

/// In-memory artifact bytes a proving call needs.
#[derive(Clone, Debug)]
pub struct ProvingArtifacts {
    pub circuit: Vec<u8>,
    pub proving_key: Vec<u8>,
}

/// Opaque external proving library boundary.
///
/// Errors arrive untyped; the generator classifies them into the taxonomy.
#[async_trait]
pub trait ProverBackend: Send + Sync {
    async fn prove(
        &self,
        witness: &ProofWitness,
        artifacts: &ProvingArtifacts,
    ) -> anyhow::Result<RawProverOutput>;
}

/// The proof-generation capability the payment orchestrator consumes.
#[async_trait]
pub trait ProofProvider: Send + Sync {
    async fn generate_proof(&self, witness: &ProofWitness) -> Result<ProofPayload>;
}

/// Maps a witness to a verifier-shaped proof payload, with two independent
/// caching layers:
///
/// 1. artifact bytes, keyed by URL, fetched once per process lifetime and
///    invalidated only by [`ProofGenerator::clear_artifacts`];
/// 2. proof results, keyed by the witness's deterministic cache key, in an
///    optional caller-supplied (possibly persistent) cache.
///
/// Nothing here retries: a failed download or proving call surfaces once
/// and the caller decides whether to repeat the whole `generate_proof`.
pub struct ProofGenerator {
    backend: Arc<dyn ProverBackend>,
    fetcher: ArtifactFetcher,
    urls: ArtifactUrls,
    artifact_cache: Arc<dyn Cache>,
    proof_cache: Option<Arc<dyn Cache>>,
    proof_ttl_secs: Option<u64>,
}

impl ProofGenerator {
    pub fn new(backend: Arc<dyn ProverBackend>, urls: ArtifactUrls) -> Self {
        Self {
            backend,
            fetcher: ArtifactFetcher::new(),
            urls,
            artifact_cache: Arc::new(MemoryCache::new()),
            proof_cache: None,
            proof_ttl_secs: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: ArtifactFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Memoize proof results in `cache`, optionally bounded by a TTL.
    ///
    /// A persistent cache shares results across processes; the key is the
    /// canonical witness digest, so logically equal witnesses collide.
    pub fn with_proof_cache(mut self, cache: Arc<dyn Cache>, ttl_secs: Option<u64>) -> Self {
        self.proof_cache = Some(cache);
        self.proof_ttl_secs = ttl_secs;
        self
    }

    /// Drop downloaded artifacts; the next proving call re-fetches them.
    pub fn clear_artifacts(&self) -> Result<()> {
        self.artifact_cache.remove(&self.urls.circuit)?;
        self.artifact_cache.remove(&self.urls.proving_key)?;
        Ok(())
    }

    async fn artifact_bytes(&self, url: &str, kind: ArtifactKind) -> Result<Vec<u8>> {
        if let Some(hexed) = self.artifact_cache.get(url)? {
            debug!(url, "artifact cache hit");
            return hex::decode(&hexed).map_err(|e| {
                Error::proof_generation(format!("corrupt cached artifact for {url}: {e}"))
            });
        }
        let bytes = self.fetcher.fetch(url, kind).await?;
        self.artifact_cache.set(url, hex::encode(&bytes), None)?;
        Ok(bytes)
    }

    async fn load_artifacts(&self) -> Result<ProvingArtifacts> {
        let circuit = self
            .artifact_bytes(&self.urls.circuit, ArtifactKind::Circuit)
            .await?;
        let proving_key = self
            .artifact_bytes(&self.urls.proving_key, ArtifactKind::ProvingKey)
            .await?;
        Ok(ProvingArtifacts {
            circuit,
            proving_key,
        })
    }
}

#[async_trait]
impl ProofProvider for ProofGenerator {
    async fn generate_proof(&self, witness: &ProofWitness) -> Result<ProofPayload> {
        let key = witness.cache_key();

        if let Some(cache) = &self.proof_cache {
            if let Some(json) = cache.get(&key)? {
                debug!(%key, "proof cache hit");
                return serde_json::from_str(&json).map_err(|e| {
                    Error::proof_generation(format!("corrupt cached proof for key {key}: {e}"))
                });
            }
        }

        let artifacts = self.load_artifacts().await?;
        let raw = match self.backend.prove(witness, &artifacts).await {
            Ok(raw) => raw,
            // A taxonomy error from the backend passes through unchanged;
            // anything else is wrapped with its original message.
            Err(err) => {
                return Err(match err.downcast::<Error>() {
                    Ok(typed) => typed,
                    Err(other) => {
                        Error::proof_generation(format!("proving backend failed: {other}"))
                    }
                })
            }
        };
        let payload = ProofPayload::from_raw(raw);

        if let Some(cache) = &self.proof_cache {
            let json = serde_json::to_string(&payload).map_err(|e| {
                Error::proof_generation(format!("proof payload encoding failed: {e}"))
            })?;
            cache.set(&key, json, self.proof_ttl_secs)?;
        }

        info!(%key, signals = payload.public_signals.len(), "proof generated");
        Ok(payload)
    }
}
