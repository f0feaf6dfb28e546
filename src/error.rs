//! Error types for fetching the schedule and reading configuration.

use thiserror::Error;

/// Anything that keeps the schedule from reaching the view.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, DNS, timeout or other transport failure
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-2xx status
    #[error("schedule service returned HTTP {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    /// The body was not the expected schedule shape
    #[error("failed to decode schedule: {0}")]
    Decode(#[from] serde_json::Error),

    /// The background fetch task died before producing a result
    #[error("fetch task did not complete: {0}")]
    Interrupted(String),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Request(other.to_string()),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}
