//! Retry wrapper around provider calls.
//!
//! Transport failures get a linearly increasing backoff: the first attempt
//! runs immediately, retry *n* waits `n × base_delay` before running. Bad
//! credentials and empty-choice responses are returned immediately — see
//! [`ProviderError::is_retryable`].

use std::future::Future;
use std::time::Duration;
use toolhand_core::error::ProviderError;
use tracing::warn;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (default 3).
    pub max_attempts: u32,
    /// Backoff unit (default 1s); retry n waits n units.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Delay before the given 0-indexed attempt: none for the first,
    /// then linear.
    pub fn delay_before_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Run a provider operation with linear-backoff retries.
///
/// Returns the last error once all attempts are exhausted; non-retryable
/// errors short-circuit.
pub async fn complete_with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_err = ProviderError::Network("no attempts were made".into());

    for attempt in 0..policy.max_attempts.max(1) {
        if attempt > 0 {
            let delay = policy.delay_before_attempt(attempt);
            warn!(
                operation = operation_name,
                attempt = attempt + 1,
                max = policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                "Retrying after backoff"
            );
            tokio::time::sleep(delay).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !e.is_retryable() {
                    return Err(e);
                }
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    error = %e,
                    "Provider call failed"
                );
                last_err = e;
            }
        }
    }

    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn delay_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_before_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_before_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_before_attempt(3), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = complete_with_retry(&fast_policy(3), "test", || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(ProviderError::Network("connection reset".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_returns_last_error_after_exact_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = complete_with_retry(&fast_policy(3), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::Timeout("deadline".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::Timeout(_))));
        // Exactly 3 attempts, never a 4th.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn backoff_waits_increase_between_attempts() {
        let start = tokio::time::Instant::now();
        let _: Result<(), _> = complete_with_retry(&fast_policy(3), "test", || async {
            Err(ProviderError::Network("down".into()))
        })
        .await;
        // Waits 1×10ms then 2×10ms between the three attempts.
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn non_retryable_short_circuits() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = complete_with_retry(&fast_policy(3), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::AuthenticationFailed("bad key".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::AuthenticationFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
