//! Exponential backoff without jitter.

use std::time::Duration;

/// Delay to wait after failed attempt number `attempt` (1-based).
///
/// Attempt 1 waits `base_ms`, attempt 2 waits `2 * base_ms`, and so on,
/// capped at `max_ms`.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);

    Duration::from_millis(delay_ms.min(max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        assert_eq!(calculate_backoff(0, 1000, 30_000), Duration::ZERO);
        assert_eq!(calculate_backoff(1, 1000, 30_000), Duration::from_millis(1000));
        assert_eq!(calculate_backoff(2, 1000, 30_000), Duration::from_millis(2000));
        assert_eq!(calculate_backoff(3, 1000, 30_000), Duration::from_millis(4000));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(calculate_backoff(10, 1000, 5000), Duration::from_millis(5000));
        assert_eq!(calculate_backoff(200, u64::MAX / 2, u64::MAX), Duration::from_millis(u64::MAX));
    }
}
