//! Chain-scoped FHE encryption client.
//!
//! Encrypts analytics values (swap and shielded-pool transaction amounts)
//! through a native FHE engine, per blockchain network, before they are
//! submitted to analytics contracts.
//!
//! # Architecture Overview
//!
//! ```text
//!     caller
//!       │
//!       ▼
//!  ┌──────────────────────────────────────────────────────────┐
//!  │ encryption::EncryptionClient                             │
//!  │                                                          │
//!  │  preconditions ─▶ security::RateLimiter ─▶ validation    │
//!  │        │                                      │          │
//!  │        ▼                                      ▼          │
//!  │  lifecycle::ChainLifecycle           native::NativeEngine│
//!  │        │                              (blocking pool)    │
//!  │        ▼                                      │          │
//!  │  keys::KeySource + resilience (retry)         ▼          │
//!  │        │                              native::Envelope   │
//!  └────────┼─────────────────────────────────────────────────┘
//!           ▼
//!     GET {cofhe_url}/v1/keys
//! ```
//!
//! `blockchain` encodes validated payloads as contract arguments.

pub mod blockchain;
pub mod config;
pub mod encryption;
pub mod error;
pub mod keys;
pub mod lifecycle;
pub mod native;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::{ClientConfig, NetworkConfig, NetworkEnvironment};
pub use encryption::{
    ClientStatus, EncryptedInput, EncryptedSwapPayload, EncryptedTransactionPayload, EncryptionClient, PoolType,
    SecurityZone, TransactionType,
};
pub use error::{ClientError, ClientResult};
pub use lifecycle::LifecycleState;
pub use native::{Envelope, NativeEngine};
