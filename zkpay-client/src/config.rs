//! Client configuration.

use std::env;

use zkpay_common::{Error, Result};

/// Default client-side transaction timeout bound, in seconds.
pub const DEFAULT_TX_TIMEOUT_SECS: u32 = 30;
/// Default confirmation polling interval, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
/// Default maximum number of confirmation poll attempts.
pub const DEFAULT_MAX_POLLS: u32 = 15;

/// Configuration for the contract client.
///
/// Polling knobs are explicit parameters with documented defaults, never
/// mutable globals; callers may also override them per watch call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Target network identifier.
    pub network: String,
    /// Contract the client invokes methods on.
    pub contract_id: String,
    pub tx_timeout_secs: u32,
    pub poll_interval_secs: u64,
    pub max_polls: u32,
}

impl ClientConfig {
    pub fn new(network: impl Into<String>, contract_id: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            contract_id: contract_id.into(),
            tx_timeout_secs: DEFAULT_TX_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `ZKPAY_CONTRACT_ID` is required; everything else falls back to a
    /// default.
    pub fn from_env() -> Result<Self> {
        let network = env::var("ZKPAY_NETWORK").unwrap_or_else(|_| "testnet".to_string());
        let contract_id = env::var("ZKPAY_CONTRACT_ID").map_err(|_| {
            Error::validation(
                "contract_id",
                "MISSING_CONFIG",
                "ZKPAY_CONTRACT_ID must be set",
            )
        })?;

        let mut config = Self::new(network, contract_id);
        if let Some(secs) = read_parsed("ZKPAY_TX_TIMEOUT_SECS") {
            config.tx_timeout_secs = secs;
        }
        if let Some(secs) = read_parsed("ZKPAY_POLL_INTERVAL_SECS") {
            config.poll_interval_secs = secs;
        }
        if let Some(polls) = read_parsed("ZKPAY_MAX_POLLS") {
            config.max_polls = polls;
        }
        Ok(config)
    }
}

fn read_parsed<T: std::str::FromStr>(var: &str) -> Option<T> {
    env::var(var).ok().and_then(|s| s.parse().ok())
}
