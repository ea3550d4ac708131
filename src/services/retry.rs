//! Backoff policy for transient API failures
use crate::api::error::ApiError;
use crate::config::{ApiConfig, RetryConfig};
use std::time::Duration;
use tracing::warn;

/// How an API failure should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transport timeout; wait one request timeout and try again
    Timeout,
    /// HTTP 429; wait out the cooldown and try again
    RateLimited,
    /// Give up on this operation
    Fatal,
}

/// Sleep-and-retry policy applied by the collector and the deleter.
///
/// There is no retry cap: a transient error is retried for as long as it keeps happening.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    timeout_backoff: Duration,
    rate_limit_cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(ApiConfig::default().timeout, RetryConfig::default().rate_limit_cooldown)
    }
}

impl RetryPolicy {
    pub fn new(timeout_backoff: Duration, rate_limit_cooldown: Duration) -> Self {
        Self { timeout_backoff, rate_limit_cooldown }
    }

    /// Policy for a run whose requests time out after `request_timeout`
    pub fn from_config(request_timeout: Duration, config: &RetryConfig) -> Self {
        Self::new(request_timeout, config.rate_limit_cooldown)
    }

    /// Classify an error without side effects
    pub fn classify(error: &ApiError) -> ErrorClass {
        match error {
            ApiError::Timeout(_) => ErrorClass::Timeout,
            ApiError::RateLimited { .. } => ErrorClass::RateLimited,
            _ => ErrorClass::Fatal,
        }
    }

    /// Time to wait before retrying, or `None` when the error is fatal
    pub fn backoff_for(&self, error: &ApiError) -> Option<Duration> {
        match Self::classify(error) {
            ErrorClass::Timeout => Some(self.timeout_backoff),
            ErrorClass::RateLimited => Some(self.rate_limit_cooldown),
            ErrorClass::Fatal => None,
        }
    }

    /// Sleep through a transient error and return `true` if the operation should be retried.
    ///
    /// Fatal errors return `false` immediately.
    pub async fn backoff(&self, error: &ApiError) -> bool {
        let Some(delay) = self.backoff_for(error) else {
            return false;
        };

        match Self::classify(error) {
            ErrorClass::RateLimited => {
                warn!("Rate limit exceeded: {}, sleeping {}", error, humantime::format_duration(delay))
            },
            _ => warn!("Timeout: {}, sleeping {}", error, humantime::format_duration(delay)),
        }

        tokio::time::sleep(delay).await;
        true
    }
}
