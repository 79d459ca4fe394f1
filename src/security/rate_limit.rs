//! Fixed-ceiling sliding window admission control.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Window start and admitted count.
struct RateWindow {
    started: Instant,
    count: u32,
}

/// Request admission shared by every chain of one client.
///
/// No queueing: a rejected caller gets an immediate `false` and is expected
/// to surface the error and retry later.
pub struct RateLimiter {
    window: Mutex<RateWindow>,
    max_requests: u32,
    window_len: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_len: Duration) -> Self {
        Self {
            window: Mutex::new(RateWindow {
                started: Instant::now(),
                count: 0,
            }),
            max_requests,
            window_len,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_millis(config.window_ms))
    }

    /// Try to admit one request now.
    pub fn admit(&self) -> bool {
        self.admit_at(Instant::now())
    }

    /// Try to admit one request at the given instant.
    pub fn admit_at(&self, now: Instant) -> bool {
        // The window holds only plain counters, so a poisoned lock is still consistent.
        let mut window = self.window.lock().unwrap_or_else(PoisonError::into_inner);

        if now.saturating_duration_since(window.started) > self.window_len {
            window.started = now;
            window.count = 1;
            return true;
        }

        if window.count >= self.max_requests {
            return false;
        }

        window.count += 1;
        true
    }

    /// Requests admitted in the current window.
    pub fn current_count(&self) -> u32 {
        self.window.lock().unwrap_or_else(PoisonError::into_inner).count
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window_len", &self.window_len)
            .field("current_count", &self.current_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_window_ceiling_and_reset() {
        let limiter = RateLimiter::new(3, Duration::from_millis(1000));
        let first = Instant::now();

        assert!(limiter.admit_at(first));
        assert!(limiter.admit_at(first + Duration::from_millis(10)));
        assert!(limiter.admit_at(first + Duration::from_millis(20)));
        assert!(!limiter.admit_at(first + Duration::from_millis(30)));
        // Rejections do not consume the window.
        assert_eq!(limiter.current_count(), 3);

        assert!(limiter.admit_at(first + Duration::from_millis(1001)));
        assert_eq!(limiter.current_count(), 1);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let limiter = RateLimiter::new(1, Duration::from_millis(1000));
        let start = Instant::now();

        assert!(limiter.admit_at(start + Duration::from_millis(1001)));
        assert!(!limiter.admit_at(start + Duration::from_millis(2001)));
        assert!(limiter.admit_at(start + Duration::from_millis(2002)));
    }

    #[test]
    fn test_concurrent_admissions_respect_ceiling() {
        let limiter = Arc::new(RateLimiter::new(50, Duration::from_secs(3600)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || (0..20).filter(|_| limiter.admit()).count())
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 50);
    }
}
