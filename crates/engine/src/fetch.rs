//! Remote data fetching
//!
//! Data-bound blocks pull JSON from an HTTP GET endpoint. The
//! [`DataFetcher`] trait is the seam between the engine's state machine
//! and the transport, so tests can script responses without a network.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Errors produced while fetching block data
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("request to '{url}' failed: {message}")]
    Request { url: String, message: String },

    /// The endpoint answered with a non-success status code
    #[error("'{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// The body was not JSON, or did not match the expected shape
    #[error("malformed payload from '{url}': {message}")]
    MalformedPayload { url: String, message: String },
}

impl From<FetchError> for pagewright_core::BuilderError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Request { url, message } => {
                pagewright_core::BuilderError::FetchRequest { url, message }
            }
            FetchError::Status { url, status } => {
                pagewright_core::BuilderError::FetchStatus { url, status }
            }
            FetchError::MalformedPayload { url, message } => {
                pagewright_core::BuilderError::MalformedPayload { url, message }
            }
        }
    }
}

/// Transport seam for data-bound blocks
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// Fetch the JSON document at `url`
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Production fetcher backed by reqwest
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a 30 second request timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a fetcher with an explicit request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| FetchError::MalformedPayload {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
