//! Bounded retry for transient database failures.
//!
//! Only failures raised before a statement could take effect are retried:
//! pool acquisition timeouts and server-side rollbacks (serialization
//! failure, deadlock, connection refusal). Anything ambiguous, such as an
//! I/O error after the statement was sent, is returned immediately so that
//! a click is never counted twice.

use std::future::Future;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

/// SQLSTATE codes for errors where PostgreSQL guarantees nothing was applied.
const RETRYABLE_SQLSTATES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "53300", // too_many_connections
    "57P03", // cannot_connect_now
];

/// Retry settings for storage calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: usize,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 50,
            max_delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Policy with the default delays and `max_retries` retries.
    pub fn with_max_retries(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Never retries.
    pub fn none() -> Self {
        Self::with_max_retries(0)
    }

    /// Exponential delays (about base, 2×base, 4×base, ...) capped at `max_delay_ms`,
    /// each scaled by random jitter.
    fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        ExponentialBackoff::from_millis(2)
            .factor((self.base_delay_ms / 2).max(1))
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .map(jitter)
            .take(self.max_retries)
    }
}

/// Returns true if `err` is known to have left the database untouched and is
/// likely to succeed on a later attempt.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| RETRYABLE_SQLSTATES.iter().any(|s| *s == code)),
        _ => false,
    }
}

/// Runs `action`, retrying transient failures according to `policy`.
///
/// `operation` names the call in log output.
pub async fn with_retry<T, F, Fut>(
    operation: &str,
    policy: RetryPolicy,
    action: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    RetryIf::spawn(policy.delays(), action, |e: &sqlx::Error| {
        let retry = is_transient(e);
        if retry {
            warn!("Transient storage error during {}: {}", operation, e);
        }
        retry
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy(max_retries: usize) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay_ms: 1,
            max_delay_ms: 5,
        }
    }

    #[test]
    fn test_pool_timeout_is_transient() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_other_errors_are_not_transient() {
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::PoolClosed));
        assert!(!is_transient(&sqlx::Error::Protocol("bad frame".to_string())));
    }

    #[test]
    fn test_delays_are_bounded() {
        let policy = RetryPolicy {
            max_retries: 5,
            base_delay_ms: 100,
            max_delay_ms: 300,
        };
        let delays: Vec<Duration> = policy.delays().collect();

        assert_eq!(delays.len(), 5);
        assert!(delays.iter().all(|d| *d <= Duration::from_millis(300)));
        assert_eq!(RetryPolicy::none().delays().count(), 0);
    }

    #[tokio::test]
    async fn test_with_retry_recovers_from_transient_error() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result = with_retry("test", fast_policy(3), move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(sqlx::Error::PoolTimedOut)
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_after_budget() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<(), _> = with_retry("test", fast_policy(2), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(sqlx::Error::PoolTimedOut)
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_does_not_retry_permanent_error() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<(), _> = with_retry("test", fast_policy(3), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(sqlx::Error::RowNotFound)
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
