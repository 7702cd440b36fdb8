//! Console configuration resolved from flags and environment.

use std::time::Duration;

use log::debug;

use crate::api::VectorSearchClient;
use crate::http::{ApiError, MAX_RETRIES, RETRY_DELAY_MS, RetryPolicy};

/// Backend address used when neither a flag nor `VECTOR_CONSOLE_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub max_retries: usize,
    pub retry_delay: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl ConsoleConfig {
    pub fn new(base_url: Option<String>, max_retries: usize, retry_delay: Duration) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_retries,
            retry_delay,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay)
    }

    /// Builds the one client the console uses for the whole session.
    #[tracing::instrument(skip(self))]
    pub fn build_client(&self) -> Result<VectorSearchClient, ApiError> {
        let policy = self.retry_policy();
        debug!(
            "Using backend {} ({} attempts, {}ms apart, up to {}ms waiting)",
            self.base_url,
            policy.max_retries(),
            policy.delay().as_millis(),
            policy.worst_case_delay().as_millis()
        );
        VectorSearchClient::new(&self.base_url, policy)
    }
}
