//! Error types for the X API adapter

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by a single API call.
///
/// The variant doubles as the classification hint used by the retry policy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The service answered with HTTP 429
    #[error("rate limit exceeded: {body}")]
    RateLimited { body: String },

    /// Any other non-success HTTP status
    #[error("API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Problem document returned in place of data
    #[error("API problem: {title}: {detail}")]
    Problem { title: String, detail: String },

    /// Connection or protocol failure other than a timeout
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to sign request: {0}")]
    Signing(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl ApiError {
    /// Build the error for a non-success HTTP response
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimited { body }
        } else {
            ApiError::Status { status, body }
        }
    }
}
