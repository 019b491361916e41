//! HTTP transport with bounded retry.
//!
//! The transport only decides whether a request reached the backend at all.
//! Status-code classification (auth vs connectivity vs bad instance) is the
//! caller's job, because the same status means different things on
//! different endpoints.

use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::retry::RetryStrategy;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client with retry capabilities.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    retry_strategy: RetryStrategy,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] if the underlying client cannot be
    /// constructed.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] if the underlying client cannot be
    /// constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("classwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Connect(e.to_string()))?;

        Ok(Self {
            inner: client,
            retry_strategy: RetryStrategy::default(),
        })
    }

    /// Sets the retry strategy for this client.
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Performs a GET request with bearer authentication.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] once transport retries are
    /// exhausted. Any response, whatever its status, is returned as `Ok`.
    pub async fn get_with_auth(&self, url: &str, token: &str) -> Result<Response, ClientError> {
        self.send_with_retry(|| {
            self.inner
                .get(url)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
        })
        .await
    }

    /// Performs a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] once transport retries are
    /// exhausted. Any response, whatever its status, is returned as `Ok`.
    pub async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        let payload =
            serde_json::to_string(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        self.send_with_retry(|| {
            self.inner
                .post(url)
                .header(header::CONTENT_TYPE, "application/json")
                .body(payload.clone())
        })
        .await
    }

    async fn send_with_retry<F>(&self, build: F) -> Result<Response, ClientError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempts = 0;
        let max_attempts = self.retry_strategy.max_attempts;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Sending request");

            match build().send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if attempts < max_attempts && self.retry_strategy.should_retry(&e) {
                        let delay = self.retry_strategy.delay_for_attempt(attempts);
                        warn!(
                            error = %e,
                            delay_secs = delay.as_secs(),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
