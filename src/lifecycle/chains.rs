//! Per-chain configuration and one-time initialization.
//!
//! # State Transitions
//! ```text
//! Unconfigured → Configured: configure()
//! Configured → Initializing: initialize() acquired the lock
//! Initializing → Initialized: keys fetched and loaded by the engine
//! Initializing → Configured: fetch or load failed, or the caller dropped
//!                             the initialize future (retry possible)
//! ```
//!
//! # Design Decisions
//! - One async lock serializes every chain's initialization; at most one key
//!   load per chain
//! - Re-configuring a chain replaces its endpoints but keeps it initialized
//! - Reads (`state`, `is_initialized`) never take the initialization lock
//! - Key loads ignore `timeouts.native_call_secs` and always run to completion
//!   while the chain is `Initializing`

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::{NetworkConfig, RetryConfig};
use crate::error::{ClientError, ClientResult};
use crate::keys::{fetch_keys_with_retry, KeySource};
use crate::native::{run_blocking, Envelope, NativeEngine};
use crate::observability::metrics;

/// Lifecycle of one chain inside a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Unconfigured,
    Configured,
    Initializing,
    Initialized,
}

/// Chain configuration store and initializer.
pub struct ChainLifecycle<E, K> {
    engine: Arc<E>,
    keys: K,
    retry: RetryConfig,
    configs: DashMap<u64, NetworkConfig>,
    states: DashMap<u64, LifecycleState>,
    init_lock: Mutex<()>,
}

impl<E: NativeEngine, K: KeySource> ChainLifecycle<E, K> {
    pub fn new(engine: Arc<E>, keys: K, retry: RetryConfig) -> Self {
        Self {
            engine,
            keys,
            retry,
            configs: DashMap::new(),
            states: DashMap::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Insert or replace the configuration for a chain.
    pub fn configure(&self, config: NetworkConfig) {
        let chain_id = config.chain_id;
        let replaced = self.configs.insert(chain_id, config).is_some();
        self.states.entry(chain_id).or_insert(LifecycleState::Configured);

        tracing::info!(chain_id, replaced, "Chain configured");
    }

    pub fn config(&self, chain_id: u64) -> Option<NetworkConfig> {
        self.configs.get(&chain_id).map(|entry| entry.value().clone())
    }

    pub fn state(&self, chain_id: u64) -> LifecycleState {
        self.states
            .get(&chain_id)
            .map(|entry| *entry.value())
            .unwrap_or(LifecycleState::Unconfigured)
    }

    pub fn is_initialized(&self, chain_id: u64) -> bool {
        self.state(chain_id) == LifecycleState::Initialized
    }

    /// Configured chain IDs, ascending.
    pub fn configured_chains(&self) -> Vec<u64> {
        let mut chains: Vec<u64> = self.configs.iter().map(|entry| *entry.key()).collect();
        chains.sort_unstable();
        chains
    }

    /// Initialized chain IDs, ascending.
    pub fn initialized_chains(&self) -> Vec<u64> {
        let mut chains: Vec<u64> = self
            .states
            .iter()
            .filter(|entry| *entry.value() == LifecycleState::Initialized)
            .map(|entry| *entry.key())
            .collect();
        chains.sort_unstable();
        chains
    }

    /// Fetch and load keys for a chain, once.
    ///
    /// Concurrent callers queue on the lock; whoever arrives after a
    /// successful initialization returns immediately.
    pub async fn initialize(&self, chain_id: u64) -> ClientResult<()> {
        let _guard = self.init_lock.lock().await;

        if self.is_initialized(chain_id) {
            tracing::debug!(chain_id, "Chain already initialized");
            return Ok(());
        }

        if let Some(reason) = self.engine.load_error() {
            return Err(ClientError::NativeUnavailable(reason));
        }

        let config = self.config(chain_id).ok_or(ClientError::NotConfigured(chain_id))?;

        let mut rollback = InitializingGuard::enter(&self.states, chain_id);
        tracing::info!(chain_id, cofhe_url = %config.cofhe_url, "Initializing chain");

        match self.load_network(&config).await {
            Ok(()) => {
                rollback.complete();
                metrics::record_initialized_chains(self.initialized_chains().len());
                tracing::info!(chain_id, "Chain initialized");
                Ok(())
            }
            Err(e) => {
                tracing::error!(chain_id, error = %e, "Chain initialization failed");
                Err(e)
            }
        }
    }

    async fn load_network(&self, config: &NetworkConfig) -> ClientResult<()> {
        let keys = fetch_keys_with_retry(&self.keys, config, &self.retry)
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let chain_id = config.chain_id;
        let response = run_blocking(&self.engine, None, move |engine| {
            engine.load_keys(chain_id, &keys.public_key, &keys.crs)
        })
        .await
        .map_err(ClientError::EncryptionFailed)?;

        Envelope::<serde_json::Value>::from_json(&response)
            .into_result()
            .map(|_| ())
            .map_err(|message| ClientError::EncryptionFailed(format!("key load rejected: {}", message)))
    }
}

impl<E, K> std::fmt::Debug for ChainLifecycle<E, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainLifecycle")
            .field("configured", &self.configs.len())
            .field("retry", &self.retry)
            .finish()
    }
}

/// Marks a chain `Initializing` and puts it back to `Configured` when dropped
/// before [`complete`](Self::complete), including when the caller abandons
/// the initialize future.
struct InitializingGuard<'a> {
    states: &'a DashMap<u64, LifecycleState>,
    chain_id: u64,
    completed: bool,
}

impl<'a> InitializingGuard<'a> {
    fn enter(states: &'a DashMap<u64, LifecycleState>, chain_id: u64) -> Self {
        states.insert(chain_id, LifecycleState::Initializing);
        Self {
            states,
            chain_id,
            completed: false,
        }
    }

    fn complete(&mut self) {
        self.states.insert(self.chain_id, LifecycleState::Initialized);
        self.completed = true;
    }
}

impl Drop for InitializingGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.states.insert(self.chain_id, LifecycleState::Configured);
        }
    }
}
