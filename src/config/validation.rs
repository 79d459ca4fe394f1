//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges, URL shapes and
//! duplicate chain IDs. Every problem is reported, not just the first.

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, network) in config.networks.iter().enumerate() {
        if !seen.insert(network.chain_id) {
            errors.push(ValidationError::new(
                format!("networks[{}].chain_id", i),
                format!("duplicate chain id {}", network.chain_id),
            ));
        }

        let urls = [
            ("cofhe_url", &network.cofhe_url),
            ("verifier_url", &network.verifier_url),
            ("threshold_network_url", &network.threshold_network_url),
        ];
        for (name, value) in urls {
            match Url::parse(value) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
                Ok(url) => errors.push(ValidationError::new(
                    format!("networks[{}].{}", i, name),
                    format!("unsupported scheme '{}'", url.scheme()),
                )),
                Err(e) => errors.push(ValidationError::new(
                    format!("networks[{}].{}", i, name),
                    format!("invalid URL '{}': {}", value, e),
                )),
            }
        }
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::new("rate_limit.max_requests", "must be > 0"));
    }
    if config.rate_limit.window_ms == 0 {
        errors.push(ValidationError::new("rate_limit.window_ms", "must be > 0"));
    }
    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be > 0"));
    }
    if config.retries.max_delay_ms < config.retries.initial_delay_ms {
        errors.push(ValidationError::new(
            "retries.max_delay_ms",
            "must be >= retries.initial_delay_ms",
        ));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be > 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }
    if config.timeouts.native_call_secs == Some(0) {
        errors.push(ValidationError::new("timeouts.native_call_secs", "must be > 0 when set"));
    }
    if config.limits.max_proof_bytes == 0 {
        errors.push(ValidationError::new("limits.max_proof_bytes", "must be > 0"));
    }
    if config.limits.max_tag_len == 0 || config.limits.max_tag_len > 32 {
        errors.push(ValidationError::new(
            "limits.max_tag_len",
            "must be between 1 and 32 (tags are stored as bytes32)",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
