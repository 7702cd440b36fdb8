//! HTTP layer: single-shot transport, retry policy and error types.

mod error;
mod retry;
mod transport;

pub use error::{ApiError, AttemptError};
pub use retry::{MAX_RETRIES, RETRY_DELAY_MS, RetryPolicy, with_retry};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{EndpointCall, HttpTransport, Transport};
