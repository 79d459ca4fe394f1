//! Security subsystem.
//!
//! # Components
//! - Rate limiting: one fixed-ceiling window per client, shared across chains
//!
//! # Design Decisions
//! - Fail fast: rejected requests are never queued
//! - Admission happens after precondition checks and before input validation
//!   or any native work

pub mod rate_limit;

pub use rate_limit::RateLimiter;
