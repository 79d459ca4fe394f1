//! Network key retrieval.
//!
//! # Responsibilities
//! - GET `{cofhe_url}/v1/keys` with connect and request timeouts
//! - Reject non-2xx responses and malformed bodies
//! - Retry every failure class with exponential backoff
//!
//! # Security
//! - Key material is never logged; `Debug` prints sizes only

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{NetworkConfig, RetryConfig, TimeoutConfig};
use crate::observability::metrics;
use crate::resilience::retry_with_backoff;

/// Public key and CRS for one network, hex encoded.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkKeys {
    pub public_key: String,
    pub crs: String,
}

impl NetworkKeys {
    fn check(self) -> Result<Self, KeyFetchError> {
        for (name, value) in [("public_key", &self.public_key), ("crs", &self.crs)] {
            let digits = value.strip_prefix("0x").unwrap_or(value);
            if digits.is_empty() {
                return Err(KeyFetchError::Malformed(format!("{} is empty", name)));
            }
            if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(KeyFetchError::Malformed(format!("{} is not valid hex", name)));
            }
        }
        Ok(self)
    }
}

impl std::fmt::Debug for NetworkKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkKeys")
            .field("public_key_len", &self.public_key.len())
            .field("crs_len", &self.crs.len())
            .finish()
    }
}

/// Errors that can occur while fetching keys. All of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFetchError {
    /// The endpoint answered with a non-2xx status.
    #[error("Failed to fetch keys: HTTP {0}")]
    Status(u16),

    /// Connection or protocol failure.
    #[error("Key request failed: {0}")]
    Transport(String),

    /// Connect or request deadline elapsed.
    #[error("Key request timed out")]
    Timeout,

    /// The body was not a valid key document.
    #[error("Malformed key response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for KeyFetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            KeyFetchError::Timeout
        } else {
            KeyFetchError::Transport(err.to_string())
        }
    }
}

/// Source of network key material.
pub trait KeySource: Send + Sync + 'static {
    /// Perform one fetch attempt.
    fn fetch_keys(
        &self,
        network: &NetworkConfig,
    ) -> impl Future<Output = Result<NetworkKeys, KeyFetchError>> + Send;
}

/// HTTP key source backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpKeyFetcher {
    http: reqwest::Client,
}

impl HttpKeyFetcher {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, KeyFetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;
        Ok(Self { http })
    }
}

impl KeySource for HttpKeyFetcher {
    fn fetch_keys(
        &self,
        network: &NetworkConfig,
    ) -> impl Future<Output = Result<NetworkKeys, KeyFetchError>> + Send {
        let http = self.http.clone();
        let url = network.keys_url();

        async move {
            let response = http.get(&url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(KeyFetchError::Status(status.as_u16()));
            }

            let body = response.text().await?;
            let keys: NetworkKeys =
                serde_json::from_str(&body).map_err(|e| KeyFetchError::Malformed(e.to_string()))?;
            keys.check()
        }
    }
}

/// Fetch keys for a network, retrying per `policy`.
///
/// Returns the last attempt's error when every attempt fails.
pub async fn fetch_keys_with_retry<K: KeySource>(
    source: &K,
    network: &NetworkConfig,
    policy: &RetryConfig,
) -> Result<NetworkKeys, KeyFetchError> {
    retry_with_backoff(policy, |attempt| {
        tracing::debug!(
            chain_id = network.chain_id,
            attempt,
            url = %network.keys_url(),
            "Fetching network keys"
        );
        let fetch = source.fetch_keys(network);
        async move {
            let result = fetch.await;
            metrics::record_key_fetch_attempt(result.is_ok());
            result
        }
    })
    .await
}
