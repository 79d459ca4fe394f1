//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the encryption client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Networks configured at startup.
    pub networks: Vec<NetworkConfig>,

    /// Request admission settings.
    pub rate_limit: RateLimitConfig,

    /// Key fetch retry settings.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Ciphertext and tag bounds.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Endpoints for one FHE-enabled chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Chain ID (e.g., 11155111 for Sepolia).
    pub chain_id: u64,

    /// CoFHE base URL; keys are served from `{cofhe_url}/v1/keys`.
    pub cofhe_url: String,

    /// ZK verifier endpoint.
    pub verifier_url: String,

    /// Threshold decryption network endpoint.
    pub threshold_network_url: String,
}

impl NetworkConfig {
    /// URL of the key endpoint for this network.
    pub fn keys_url(&self) -> String {
        format!("{}/v1/keys", self.cofhe_url.trim_end_matches('/'))
    }
}

/// Rate limiting configuration.
///
/// One window is shared by every chain of a client instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window.
    pub max_requests: u32,

    /// Window length in milliseconds.
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_ms: 60_000,
        }
    }
}

/// Retry configuration for key fetching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles for each further attempt.
    pub initial_delay_ms: u64,

    /// Upper bound for a single delay.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

/// Timeout configuration for external calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for key fetches, in seconds.
    pub connect_secs: u64,

    /// Total key fetch request timeout, in seconds.
    pub request_secs: u64,

    /// Optional bound on a single native engine call, in seconds.
    /// Unset means the call runs to completion.
    pub native_call_secs: Option<u64>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 30,
            request_secs: 30,
            native_call_secs: None,
        }
    }
}

/// Bounds applied to engine output and caller input.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted proof blob size in bytes.
    pub max_proof_bytes: usize,

    /// Maximum classification tag length in bytes (contract stores bytes32).
    pub max_tag_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_proof_bytes: 10 * 1024 * 1024, // 10 MiB
            max_tag_len: 32,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.networks.is_empty());
        assert_eq!(config.rate_limit.max_requests, 60);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.retries.max_attempts, 3);
        assert_eq!(config.retries.initial_delay_ms, 1000);
        assert_eq!(config.limits.max_proof_bytes, 10 * 1024 * 1024);
        assert!(config.timeouts.native_call_secs.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [rate_limit]
            max_requests = 5

            [[networks]]
            chain_id = 421614
            cofhe_url = "https://testnet-cofhe.fhenix.zone/"
            verifier_url = "https://testnet-cofhe-vrf.fhenix.zone"
            threshold_network_url = "https://testnet-cofhe-tn.fhenix.zone"
            "#,
        )
        .unwrap();

        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.networks.len(), 1);
        assert_eq!(
            config.networks[0].keys_url(),
            "https://testnet-cofhe.fhenix.zone/v1/keys"
        );
    }
}
