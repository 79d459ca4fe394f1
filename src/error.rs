//! Client error taxonomy.

use thiserror::Error;

/// Errors returned by every fallible client operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No network configuration exists for the chain.
    #[error("Chain {0} not configured. Call configure() first.")]
    NotConfigured(u64),

    /// The chain has not completed initialization.
    #[error("Chain {0} not initialized. Call initialize() first.")]
    NotInitialized(u64),

    /// The native engine failed to load or link.
    #[error("Native engine unavailable: {0}")]
    NativeUnavailable(String),

    /// Key fetching exhausted its retries.
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed caller input or malformed engine output.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The shared request window is full.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    /// The native engine reported a failure or returned an unreadable response.
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
}

impl ClientError {
    /// Whether repeating the same call later may succeed.
    ///
    /// Validation failures must be fixed by the caller. Encryption failures are
    /// left to the caller to resubmit.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::RateLimitExceeded | ClientError::Network(_))
    }

    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::NotConfigured(_) => "not_configured",
            ClientError::NotInitialized(_) => "not_initialized",
            ClientError::NativeUnavailable(_) => "native_unavailable",
            ClientError::Network(_) => "network_error",
            ClientError::Validation(_) => "validation_error",
            ClientError::RateLimitExceeded => "rate_limited",
            ClientError::EncryptionFailed(_) => "encryption_failed",
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
