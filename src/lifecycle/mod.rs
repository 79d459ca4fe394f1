//! Chain lifecycle management.
//!
//! # Data Flow
//! ```text
//! configure(NetworkConfig)
//!     → chains.rs (config map, state = Configured)
//!
//! initialize(chain_id)
//!     → chains.rs (global init lock, idempotence check)
//!     → keys (fetch with retry)
//!     → native (load_keys on the blocking pool)
//!     → state = Initialized | back to Configured
//! ```

pub mod chains;

pub use chains::{ChainLifecycle, LifecycleState};
