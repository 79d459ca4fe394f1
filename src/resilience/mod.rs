//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Key fetch for a chain:
//!     → reqwest connect/request timeouts bound each attempt
//!     → On failure: retries.rs (retry with backoff)
//!     → backoff.rs (1s, 2s, ... capped, no jitter)
//! ```
//!
//! # Design Decisions
//! - Every key request has a connect and a total deadline
//! - Only key fetching retries; encryption calls never do
//! - No jitter; initialization is serialized by the lifecycle lock

pub mod backoff;
pub mod retries;

pub use retries::retry_with_backoff;
