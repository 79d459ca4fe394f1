//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Encryption operations run inside a span carrying chain_id and a UUID
//! operation_id, so native calls and validation failures correlate.
//! ```
//!
//! # Design Decisions
//! - Key material and plaintext amounts are never logged
//! - Metrics are no-ops until the embedder installs a recorder

pub mod logging;
pub mod metrics;
