//! On-chain representation of encrypted payloads.

pub mod contract;

pub use contract::{tag_to_bytes32, EncryptedInputArgs, SwapSubmission, TransactionSubmission};
