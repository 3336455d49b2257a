//! Bounded retry with linear backoff.

use std::time::Duration;

/// Attempts made against the upstream before falling back.
pub const MAX_RETRIES: u32 = 2;

/// Base backoff unit; the wait after attempt `n` is `n * RETRY_DELAY_MS`.
pub const RETRY_DELAY_MS: u64 = 500;

/// How many times to try and how long to wait in between.
///
/// `Copy` so it can be passed around freely; the default matches
/// [`MAX_RETRIES`] and [`RETRY_DELAY_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            base_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Same attempt count, no waiting. Handy in tests.
    pub fn without_delay(self) -> Self {
        Self {
            base_delay: Duration::ZERO,
            ..self
        }
    }

    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[inline]
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Wait after failed attempt `attempt` (1-based) before the next one.
    ///
    /// ```rust
    /// use gq_proxy::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_after(1), Duration::from_millis(500));
    /// assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
    /// ```
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Total time spent sleeping when every attempt fails.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts).map(|n| self.delay_after(n)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 2);
        assert_eq!(policy.base_delay(), Duration::from_millis(500));
        assert_eq!(policy.total_backoff(), Duration::from_millis(500));
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(3), Duration::from_millis(300));
        assert_eq!(policy.total_backoff(), Duration::from_millis(600));
    }

    #[test]
    fn test_at_least_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::from_millis(100));
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.total_backoff(), Duration::ZERO);
    }

    #[test]
    fn test_without_delay() {
        let policy = RetryPolicy::default().without_delay();
        assert_eq!(policy.max_attempts(), MAX_RETRIES);
        assert_eq!(policy.delay_after(1), Duration::ZERO);
    }
}
