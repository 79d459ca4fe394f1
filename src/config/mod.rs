//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → EncryptionClient::from_config
//!
//! CLI --network flag
//!     → networks.rs (preset endpoints)
//!     → appended to ClientConfig::networks
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Network entries are plain data; the client owns lifecycle state

pub mod loader;
pub mod networks;
pub mod schema;
pub mod validation;

pub use networks::NetworkEnvironment;
pub use schema::ClientConfig;
pub use schema::LimitsConfig;
pub use schema::NetworkConfig;
pub use schema::ObservabilityConfig;
pub use schema::RateLimitConfig;
pub use schema::RetryConfig;
pub use schema::TimeoutConfig;
