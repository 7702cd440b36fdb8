//! Fixed-count, fixed-delay retry for backend calls.
//!
//! The backend is expected to be slow to come up (service or tunnel cold
//! start), so every failure is retried the same way: no status
//! classification, no backoff growth, no jitter.

use std::future::Future;
use std::time::Duration;

use log::{debug, error, warn};

use super::error::{ApiError, AttemptError};

/// Default number of attempts per operation.
pub const MAX_RETRIES: usize = 10;

/// Default delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: usize,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// A policy always makes at least one attempt.
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            delay,
        }
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Total time spent sleeping when every attempt fails.
    /// Network time per attempt comes on top of this.
    pub fn worst_case_delay(&self) -> Duration {
        u32::try_from(self.max_retries - 1)
            .map(|pauses| self.delay.saturating_mul(pauses))
            .unwrap_or(Duration::MAX)
    }
}

/// Runs `operation` until it succeeds or `policy.max_retries()` attempts have failed.
///
/// The attempt counter is local to this invocation. Each failure is logged;
/// the last one is returned inside [`ApiError::Exhausted`].
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: succeeded after {} failed attempt(s)",
                        operation_name, attempt
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;

                if attempt >= policy.max_retries() {
                    error!(
                        "{}: failed to reach the backend after {} attempts: {}",
                        operation_name, attempt, e
                    );
                    return Err(ApiError::Exhausted {
                        operation: operation_name.to_string(),
                        attempts: attempt,
                        last: e,
                    });
                }

                warn!(
                    "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                    operation_name,
                    attempt,
                    policy.max_retries(),
                    e,
                    policy.delay().as_millis()
                );
                tokio::time::sleep(policy.delay()).await;
            }
        }
    }
}
