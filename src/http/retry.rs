// ABOUTME: Retry with capped exponential backoff, bounded by attempts and elapsed time.
// ABOUTME: A predicate decides which errors are worth retrying at all.

use std::time::{Duration, Instant};

use tokio::time::sleep;

use crate::config::RetrySettings;

/// Retry policy configuration for exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: usize,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap for a single delay.
    pub max_delay: Duration,
    /// Growth factor between delays.
    pub multiplier: f64,
    /// Wall-clock budget across all attempts.
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            max_elapsed: Duration::from_secs(30),
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            multiplier: 2.0,
            max_elapsed: Duration::from_secs(settings.max_elapsed_secs),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based), capped at `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: usize) -> Duration {
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.multiplier.powi(retry as i32);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

/// Retry an async operation while `is_retryable` approves of its errors.
///
/// Returns the first success, or the last error once the error is not
/// retryable, attempts are exhausted, or the next delay would overrun the
/// wall-clock budget.
pub async fn retry_with_predicate<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let started = Instant::now();
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !is_retryable(&err) {
                    tracing::debug!(error = %err, "Error is not retryable, failing immediately");
                    return Err(err);
                }

                if attempt >= policy.max_attempts {
                    tracing::warn!(attempt, error = %err, "Giving up after max attempts");
                    return Err(err);
                }

                let delay = policy.delay_for_retry(attempt - 1);
                if started.elapsed() + delay > policy.max_elapsed {
                    tracing::warn!(
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %err,
                        "Giving up, retry budget exhausted"
                    );
                    return Err(err);
                }

                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, retrying"
                );
                sleep(delay).await;
            }
        }
    }
}
