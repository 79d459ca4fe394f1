//! Native FHE engine boundary.
//!
//! The engine is an external collaborator. It receives primitive arguments
//! and answers with a serialized [`Envelope`](crate::native::Envelope).
//! Calls are synchronous and CPU-bound; the client runs them on the blocking
//! thread pool.

use std::sync::Arc;
use std::time::Duration;

use crate::native::envelope::Envelope;

/// Arguments for a two-value swap encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub chain_id: u64,
    pub account: String,
    pub amount_in: u64,
    pub fee: u64,
    pub destination_asset: String,
    pub platform: String,
    pub security_zone: u32,
}

/// Arguments for a two-value transaction encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub chain_id: u64,
    pub account: String,
    pub amount: u64,
    pub fee: u64,
    pub transaction_type: String,
    pub pool_type: String,
    pub platform: String,
    pub security_zone: u32,
}

/// Capability exposed by a loaded FHE engine.
///
/// Every method returns the JSON envelope text produced by the engine,
/// never panics across the boundary.
pub trait NativeEngine: Send + Sync + 'static {
    /// Why the engine could not be loaded, or `None` when it is usable.
    fn load_error(&self) -> Option<String>;

    fn is_available(&self) -> bool {
        self.load_error().is_none()
    }

    /// Load network key material for a chain.
    fn load_keys(&self, chain_id: u64, public_key_hex: &str, crs_hex: &str) -> String;

    /// Encrypt a single 64-bit value.
    fn encrypt_value(&self, chain_id: u64, account: &str, value: u64, security_zone: u32) -> String;

    fn encrypt_swap(&self, request: &SwapRequest) -> String;

    fn encrypt_transaction(&self, request: &TransactionRequest) -> String;
}

/// Stand-in used when no engine is linked into the process.
///
/// Reports itself unavailable and answers every call with an error envelope.
#[derive(Debug, Clone)]
pub struct UnavailableEngine {
    reason: String,
}

impl UnavailableEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn refuse(&self) -> String {
        Envelope::<()>::error(self.reason.clone()).to_json()
    }
}

impl Default for UnavailableEngine {
    fn default() -> Self {
        Self::new("Native library not loaded")
    }
}

impl NativeEngine for UnavailableEngine {
    fn load_error(&self) -> Option<String> {
        Some(self.reason.clone())
    }

    fn load_keys(&self, _chain_id: u64, _public_key_hex: &str, _crs_hex: &str) -> String {
        self.refuse()
    }

    fn encrypt_value(&self, _chain_id: u64, _account: &str, _value: u64, _security_zone: u32) -> String {
        self.refuse()
    }

    fn encrypt_swap(&self, _request: &SwapRequest) -> String {
        self.refuse()
    }

    fn encrypt_transaction(&self, _request: &TransactionRequest) -> String {
        self.refuse()
    }
}

/// Run a native call on the blocking pool so async callers never stall.
///
/// With `limit` set, the caller stops waiting after the deadline; the native
/// call itself cannot be interrupted and finishes in the background.
pub async fn run_blocking<E, F>(engine: &Arc<E>, limit: Option<Duration>, call: F) -> Result<String, String>
where
    E: NativeEngine,
    F: FnOnce(&E) -> String + Send + 'static,
{
    let engine = Arc::clone(engine);
    let task = tokio::task::spawn_blocking(move || call(engine.as_ref()));

    let joined = match limit {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => return Err(format!("native call timed out after {}ms", limit.as_millis())),
        },
        None => task.await,
    };

    joined.map_err(|e| format!("native call aborted: {}", e))
}
