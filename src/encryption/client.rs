//! Encryption client facade.
//!
//! # Operation Pipeline
//! ```text
//! encrypt_*(chain_id, ...)
//!     → preconditions (engine available, chain initialized)
//!     → rate limiter admission
//!     → input validation (account, tags)
//!     → native engine on the blocking pool
//!     → envelope parsing
//!     → output validation of every ciphertext
//! ```
//! Any failed step returns immediately. Nothing inside the pipeline is
//! retried; resubmitting is the caller's decision.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ClientConfig, LimitsConfig, NetworkConfig};
use crate::encryption::types::{
    EncryptedInput, EncryptedSwapPayload, EncryptedTransactionPayload, PoolType, SecurityZone, TransactionType,
};
use crate::encryption::validation::{
    validate_account, validate_swap_payload, validate_tag, validate_transaction_payload, validate_value_output,
};
use crate::error::{ClientError, ClientResult};
use crate::keys::{HttpKeyFetcher, KeySource};
use crate::lifecycle::{ChainLifecycle, LifecycleState};
use crate::native::{run_blocking, Envelope, NativeEngine, SwapRequest, TransactionRequest};
use crate::observability::metrics;
use crate::security::RateLimiter;

/// Snapshot of client readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStatus {
    pub native_available: bool,
    pub native_error: Option<String>,
    pub configured_chains: Vec<u64>,
    pub initialized_chains: Vec<u64>,
}

/// Chain-scoped FHE encryption client.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
/// All methods take `&self`.
pub struct EncryptionClient<E, K = HttpKeyFetcher> {
    engine: Arc<E>,
    lifecycle: ChainLifecycle<E, K>,
    limiter: RateLimiter,
    limits: LimitsConfig,
    native_timeout: Option<Duration>,
}

impl<E: NativeEngine> EncryptionClient<E, HttpKeyFetcher> {
    /// Build a client that fetches keys over HTTP.
    pub fn from_config(config: &ClientConfig, engine: Arc<E>) -> ClientResult<Self> {
        let keys = HttpKeyFetcher::new(&config.timeouts).map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self::with_key_source(config, engine, keys))
    }
}

impl<E: NativeEngine, K: KeySource> EncryptionClient<E, K> {
    /// Build a client with a custom key source. Networks listed in the
    /// configuration are configured immediately.
    pub fn with_key_source(config: &ClientConfig, engine: Arc<E>, keys: K) -> Self {
        let native_timeout = config.timeouts.native_call_secs.map(Duration::from_secs);
        let lifecycle = ChainLifecycle::new(Arc::clone(&engine), keys, config.retries.clone());

        for network in &config.networks {
            lifecycle.configure(network.clone());
        }

        if let Some(reason) = engine.load_error() {
            tracing::warn!(error = %reason, "Native engine unavailable; encryption disabled");
        }

        Self {
            engine,
            lifecycle,
            limiter: RateLimiter::from_config(&config.rate_limit),
            limits: config.limits.clone(),
            native_timeout,
        }
    }

    pub fn configure(&self, config: NetworkConfig) {
        self.lifecycle.configure(config);
    }

    pub fn is_initialized(&self, chain_id: u64) -> bool {
        self.lifecycle.is_initialized(chain_id)
    }

    pub fn state(&self, chain_id: u64) -> LifecycleState {
        self.lifecycle.state(chain_id)
    }

    /// Fetch and load keys for a configured chain. Idempotent.
    pub async fn initialize(&self, chain_id: u64) -> ClientResult<()> {
        let result = self.lifecycle.initialize(chain_id).await;
        finish("initialize", result)
    }

    pub fn status(&self) -> ClientStatus {
        let native_error = self.engine.load_error();
        ClientStatus {
            native_available: native_error.is_none(),
            native_error,
            configured_chains: self.lifecycle.configured_chains(),
            initialized_chains: self.lifecycle.initialized_chains(),
        }
    }

    /// Encrypt one 64-bit value.
    pub async fn encrypt_value(
        &self,
        chain_id: u64,
        account: &str,
        value: u64,
        zone: SecurityZone,
    ) -> ClientResult<EncryptedInput> {
        let span = operation_span("encrypt_value", chain_id);
        let result = async {
            self.admit(chain_id)?;
            validate_account(account)?;

            let account = account.to_string();
            let zone = zone.value();
            let response = self
                .call_engine(move |engine| engine.encrypt_value(chain_id, &account, value, zone))
                .await?;

            let input: EncryptedInput = parse_response(&response)?;
            validate_value_output(&input, &self.limits)?;
            Ok(input)
        }
        .instrument(span)
        .await;

        finish("encrypt_value", result)
    }

    /// Encrypt the amount and fee of a swap with its classification tags.
    #[allow(clippy::too_many_arguments)]
    pub async fn encrypt_swap(
        &self,
        chain_id: u64,
        account: &str,
        amount_in: u64,
        fee: u64,
        destination_asset: &str,
        platform: &str,
        zone: SecurityZone,
    ) -> ClientResult<EncryptedSwapPayload> {
        let span = operation_span("encrypt_swap", chain_id);
        let result = async {
            self.admit(chain_id)?;
            validate_account(account)?;
            validate_tag("destination_asset", destination_asset, self.limits.max_tag_len)?;
            validate_tag("platform", platform, self.limits.max_tag_len)?;

            let request = SwapRequest {
                chain_id,
                account: account.to_string(),
                amount_in,
                fee,
                destination_asset: destination_asset.to_string(),
                platform: platform.to_string(),
                security_zone: zone.value(),
            };
            let response = self.call_engine(move |engine| engine.encrypt_swap(&request)).await?;

            let payload: EncryptedSwapPayload = parse_response(&response)?;
            validate_swap_payload(&payload, &self.limits)?;
            Ok(payload)
        }
        .instrument(span)
        .await;

        finish("encrypt_swap", result)
    }

    /// Encrypt the amount and fee of a shielded-pool transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn encrypt_transaction(
        &self,
        chain_id: u64,
        account: &str,
        amount: u64,
        fee: u64,
        transaction_type: TransactionType,
        pool_type: PoolType,
        platform: &str,
        zone: SecurityZone,
    ) -> ClientResult<EncryptedTransactionPayload> {
        let span = operation_span("encrypt_transaction", chain_id);
        let result = async {
            self.admit(chain_id)?;
            validate_account(account)?;
            validate_tag("platform", platform, self.limits.max_tag_len)?;

            let request = TransactionRequest {
                chain_id,
                account: account.to_string(),
                amount,
                fee,
                transaction_type: transaction_type.as_str().to_string(),
                pool_type: pool_type.as_str().to_string(),
                platform: platform.to_string(),
                security_zone: zone.value(),
            };
            let response = self
                .call_engine(move |engine| engine.encrypt_transaction(&request))
                .await?;

            let payload: EncryptedTransactionPayload = parse_response(&response)?;
            validate_transaction_payload(&payload, &self.limits)?;
            Ok(payload)
        }
        .instrument(span)
        .await;

        finish("encrypt_transaction", result)
    }

    /// Preconditions and rate limiter admission.
    fn admit(&self, chain_id: u64) -> ClientResult<()> {
        if let Some(reason) = self.engine.load_error() {
            return Err(ClientError::NativeUnavailable(reason));
        }
        if !self.lifecycle.is_initialized(chain_id) {
            return Err(ClientError::NotInitialized(chain_id));
        }
        if !self.limiter.admit() {
            metrics::record_rate_limited();
            return Err(ClientError::RateLimitExceeded);
        }
        Ok(())
    }

    async fn call_engine<F>(&self, call: F) -> ClientResult<String>
    where
        F: FnOnce(&E) -> String + Send + 'static,
    {
        run_blocking(&self.engine, self.native_timeout, call)
            .await
            .map_err(ClientError::EncryptionFailed)
    }
}

impl<E, K> std::fmt::Debug for EncryptionClient<E, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionClient")
            .field("lifecycle", &self.lifecycle)
            .field("limiter", &self.limiter)
            .field("limits", &self.limits)
            .finish()
    }
}

fn operation_span(operation: &'static str, chain_id: u64) -> tracing::Span {
    tracing::info_span!("encrypt", operation, chain_id, operation_id = %Uuid::new_v4())
}

fn parse_response<T: DeserializeOwned>(response: &str) -> ClientResult<T> {
    Envelope::<T>::from_json(response)
        .into_result()
        .map_err(ClientError::EncryptionFailed)
}

fn finish<T>(operation: &'static str, result: ClientResult<T>) -> ClientResult<T> {
    match &result {
        Ok(_) => {
            metrics::record_operation(operation, "success");
            tracing::debug!(operation, "Operation succeeded");
        }
        Err(e) => {
            metrics::record_operation(operation, e.kind());
            tracing::warn!(operation, error = %e, kind = e.kind(), "Operation failed");
        }
    }
    result
}
