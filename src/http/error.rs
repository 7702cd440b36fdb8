//! Errors raised while talking to the backend.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a single attempt failed. Every variant is retried.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Connection refused, timeout, DNS failure and friends.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend responded with HTTP {status}")]
    Status { status: StatusCode },

    /// The body was not valid JSON, or not the shape the operation expects.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Terminal outcome of a client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation}: backend unavailable after {attempts} attempts: {last}")]
    Exhausted {
        operation: String,
        attempts: usize,
        #[source]
        last: AttemptError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// Number of attempts made before giving up, if the operation ran at all.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            ApiError::Exhausted { attempts, .. } => Some(*attempts),
            ApiError::Client(_) => None,
        }
    }
}
