//! Key retrieval subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkConfig
//!     → fetcher.rs (GET {cofhe_url}/v1/keys, timeouts)
//!     → resilience::retries (up to 3 attempts, 1s/2s backoff)
//!     → NetworkKeys (hex public key + CRS)
//!     → NativeEngine::load_keys
//! ```
//!
//! # Design Decisions
//! - `KeySource` is a trait so tests and embedders can supply keys without HTTP
//! - 4xx and 5xx are retried alike; the status is kept in the error

pub mod fetcher;

pub use fetcher::{fetch_keys_with_retry, HttpKeyFetcher, KeyFetchError, KeySource, NetworkKeys};
