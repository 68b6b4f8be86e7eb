//! Downloading proving artifacts (circuit programs, proving keys).

use std::time::Duration;

use tracing::debug;
use zkpay_common::{Error, Result};

/// Default budget for compact artifacts such as circuit programs.
pub const DEFAULT_SHORT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default budget for large artifacts such as proving keys.
pub const DEFAULT_LONG_TIMEOUT: Duration = Duration::from_secs(120);

/// Artifact categories, with distinct download budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Compact circuit program; short timeout.
    Circuit,
    /// Large proving key; long timeout.
    ProvingKey,
}

/// Per-kind timeout budgets.
#[derive(Clone, Copy, Debug)]
pub struct FetchTimeouts {
    pub short: Duration,
    pub long: Duration,
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT_TIMEOUT,
            long: DEFAULT_LONG_TIMEOUT,
        }
    }
}

/// HTTP fetcher for proving artifacts.
///
/// Failures name the failing URL and are never retried here; the caller
/// decides whether to retry a whole proving call.
pub struct ArtifactFetcher {
    client: reqwest::Client,
    timeouts: FetchTimeouts,
}

impl ArtifactFetcher {
    pub fn new() -> Self {
        Self::with_timeouts(FetchTimeouts::default())
    }

    pub fn with_timeouts(timeouts: FetchTimeouts) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeouts,
        }
    }

    fn budget(&self, kind: ArtifactKind) -> Duration {
        match kind {
            ArtifactKind::Circuit => self.timeouts.short,
            ArtifactKind::ProvingKey => self.timeouts.long,
        }
    }

    /// Download one artifact.
    pub async fn fetch(&self, url: &str, kind: ArtifactKind) -> Result<Vec<u8>> {
        debug!(url, ?kind, "downloading proving artifact");
        let response = self
            .client
            .get(url)
            .timeout(self.budget(kind))
            .send()
            .await
            .map_err(|e| {
                Error::proof_generation(format!("artifact download failed for {url}: {e}"))
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::proof_generation(format!(
                "artifact download for {url} returned HTTP {}",
                status.as_u16()
            )));
        }
        let bytes = response.bytes().await.map_err(|e| {
            Error::proof_generation(format!("artifact body read failed for {url}: {e}"))
        })?;
        debug!(url, size = bytes.len(), "artifact downloaded");
        Ok(bytes.to_vec())
    }
}

impl Default for ArtifactFetcher {
    fn default() -> Self {
        Self::new()
    }
}
