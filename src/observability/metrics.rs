//! Metrics collection.
//!
//! # Metrics
//! - `fhe_client_operations_total` (counter): operations by name and outcome
//! - `fhe_client_rate_limited_total` (counter): rejected admissions
//! - `fhe_client_key_fetch_attempts_total` (counter): key fetch attempts by outcome
//! - `fhe_client_initialized_chains` (gauge): chains ready for encryption
//!
//! Recording goes through the `metrics` facade. Without an installed
//! recorder every call is a no-op; exporters are the embedder's choice.

/// Record the outcome of a public client operation.
pub fn record_operation(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "fhe_client_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a request rejected by the rate limiter.
pub fn record_rate_limited() {
    metrics::counter!("fhe_client_rate_limited_total").increment(1);
}

/// Record a single key fetch attempt.
pub fn record_key_fetch_attempt(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("fhe_client_key_fetch_attempts_total", "outcome" => outcome).increment(1);
}

/// Record the number of initialized chains.
pub fn record_initialized_chains(count: usize) {
    metrics::gauge!("fhe_client_initialized_chains").set(count as f64);
}
