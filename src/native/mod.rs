//! Native engine boundary.
//!
//! # Data Flow
//! ```text
//! EncryptionClient
//!     → engine.rs (NativeEngine: primitive args in, JSON text out)
//!     → envelope.rs (Envelope<T>: parse success/error shape)
//!     → typed payload or error message
//! ```
//!
//! # Design Decisions
//! - The engine never throws across the boundary; failures are envelopes
//! - Parsing never panics; malformed text becomes an error envelope
//! - The crate ships no engine, only the trait and an unavailable stand-in

pub mod engine;
pub mod envelope;

pub use engine::{run_blocking, NativeEngine, SwapRequest, TransactionRequest, UnavailableEngine};
pub use envelope::Envelope;
