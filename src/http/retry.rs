//! Classification of HTTP failures into retryable and final ones.

use reqwest::StatusCode;

/// Attempts made for a request unless configured otherwise. One attempt means no retry.
pub const DEFAULT_ATTEMPTS: usize = 1;

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Errors that should not be retried.
#[derive(Debug)]
pub enum NonRetryableError {
    /// HTTP 429, or 403 mentioning a rate limit
    RateLimitExceeded(String),
    /// HTTP 404
    NotFound(String),
    /// HTTP 403
    Forbidden(String),
    /// Other 4xx responses
    ClientError(String),
}

impl std::fmt::Display for NonRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonRetryableError::RateLimitExceeded(msg) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", msg)
            }
            NonRetryableError::NotFound(msg) => write!(f, "Not found: {}", msg),
            NonRetryableError::Forbidden(msg) => write!(f, "Access forbidden: {}", msg),
            NonRetryableError::ClientError(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for NonRetryableError {}

/// Classifies an error as retryable or non-retryable.
/// Returns Ok(()) if the error is retryable.
pub fn classify_error(error: &reqwest::Error) -> Result<(), NonRetryableError> {
    let Some(status) = error.status() else {
        // Connect errors and timeouts
        return Ok(());
    };

    match status {
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(
            "no release artifact at this location".to_string(),
        )),
        StatusCode::TOO_MANY_REQUESTS => Err(NonRetryableError::RateLimitExceeded(
            "too many requests".to_string(),
        )),
        StatusCode::FORBIDDEN => {
            if error.to_string().contains("rate limit") {
                Err(NonRetryableError::RateLimitExceeded(
                    "download host rate limit exceeded".to_string(),
                ))
            } else {
                Err(NonRetryableError::Forbidden(
                    "the download host refused the request".to_string(),
                ))
            }
        }
        s if s.is_client_error() => Err(NonRetryableError::ClientError(format!(
            "HTTP {} error",
            s.as_u16()
        ))),
        // 5xx
        _ => Ok(()),
    }
}

/// Converts an error from `error_for_status()` into an `anyhow::Error`,
/// replacing it with a [`NonRetryableError`] when retrying cannot help.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}
