//! HTTP client used to download release artifacts.

use anyhow::{Context, Result};
use bytes::Bytes;
use log::{debug, warn};
use reqwest::Client;

use super::retry::{DEFAULT_ATTEMPTS, NonRetryableError, RETRY_DELAY_MS, check_retryable};

/// HTTP client with an optional bounded retry loop.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    attempts: usize,
    strict_status: bool,
}

impl HttpClient {
    /// Creates a client that makes a single attempt per request and
    /// accepts any response status.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            attempts: DEFAULT_ATTEMPTS,
            strict_status: false,
        }
    }

    /// Sets how many times a transient failure is attempted in total.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Rejects non-success responses instead of returning their body.
    pub fn with_strict_status(mut self, strict_status: bool) -> Self {
        self.strict_status = strict_status;
        self
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn strict_status(&self) -> bool {
        self.strict_status
    }

    /// GETs `url` and buffers the whole response body.
    /// Redirects are followed according to the client's policy.
    #[tracing::instrument(skip(self))]
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes> {
        debug!("GET {}...", url);

        let body = self
            .with_retry("GET", || async {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .context("Failed to send request")?;

                let status = response.status();
                debug!("{} responded with {} from {}", url, status, response.url());

                let response = if self.strict_status {
                    response.error_for_status().map_err(check_retryable)?
                } else {
                    // TODO: the status is not checked here, so a non-empty error page is
                    // returned as the body. Drop this branch once the default switches to strict.
                    if !status.is_success() {
                        warn!("{} responded with {}, keeping the body anyway", url, status);
                    }
                    response
                };

                response
                    .bytes()
                    .await
                    .context("Failed to read response body")
            })
            .await?;

        debug!(
            "Downloaded {:.2} MB",
            body.len() as f64 / (1024.0 * 1024.0)
        );

        Ok(body)
    }

    /// Executes an async operation with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation_name: &str, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !is_retryable_error(&e) {
                        debug!("{}: non-retryable error: {}", operation_name, e);
                        return Err(e);
                    }

                    if attempt < self.attempts {
                        warn!(
                            "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                            operation_name, attempt, self.attempts, e, RETRY_DELAY_MS
                        );
                        tokio::time::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            anyhow::anyhow!("{}: failed after {} attempts", operation_name, self.attempts)
        }))
    }
}

fn is_retryable_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<NonRetryableError>().is_none()
}
