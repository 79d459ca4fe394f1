//! Encryption operations.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs (EncryptionClient: preconditions, admission, delegation)
//!     → validation.rs (account, tags, ciphertext shape)
//!     → types.rs (EncryptedInput and payloads)
//! ```
//!
//! `units.rs` converts display amounts to the integer base unit handed to
//! the engine.

pub mod client;
pub mod types;
pub mod units;
pub mod validation;

pub use client::{ClientStatus, EncryptionClient};
pub use types::{
    EncryptedInput, EncryptedSwapPayload, EncryptedTransactionPayload, FheUintType, PoolType, SecurityZone,
    TransactionType,
};
pub use units::{from_base_units, to_base_units, BASE_UNITS_PER_COIN};
