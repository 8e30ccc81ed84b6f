//! Deploy client
//!
//! Deploy mode builds the exact same archive as download mode and uploads
//! it as a single multipart `file` part to the configured endpoint. The
//! endpoint answers with JSON: `{"vercelProjectUrl": "..."}` on success,
//! `{"error": "..."}` on rejection. Rejection text is surfaced to the user
//! verbatim; every other failure gets a generic user-facing message while
//! the specific cause stays in the error value and the logs.

use crate::archive::{archive_bundle, ARCHIVE_FILENAME};
use crate::bundle::{assemble_bundle, ExportConfig, ExportError};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors produced by a deploy submission
#[derive(Debug, Error)]
pub enum DeployError {
    /// The upload failed at the transport level
    #[error("deploy request failed: {0}")]
    Request(String),

    /// The endpoint did not answer within the configured timeout
    #[error("deploy request timed out")]
    TimedOut,

    /// The endpoint rejected the bundle with an error message
    #[error("deployment rejected: {0}")]
    Rejected(String),

    /// The endpoint's response body was not the expected JSON shape
    #[error("malformed deploy response: {0}")]
    MalformedResponse(String),

    /// The bundle could not be assembled or archived
    #[error(transparent)]
    Packaging(#[from] ExportError),
}

impl DeployError {
    /// The message shown to the user.
    ///
    /// Server rejection text passes through verbatim; everything else is
    /// collapsed into a generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            DeployError::Rejected(text) => text.clone(),
            _ => "Deployment failed. Please try again.".to_string(),
        }
    }
}

impl From<DeployError> for pagewright_core::BuilderError {
    fn from(err: DeployError) -> Self {
        match err {
            DeployError::Request(message) => pagewright_core::BuilderError::DeployRequest(message),
            DeployError::TimedOut => pagewright_core::BuilderError::DeployTimedOut,
            DeployError::Rejected(text) => pagewright_core::BuilderError::DeployRejected(text),
            DeployError::MalformedResponse(message) => {
                pagewright_core::BuilderError::DeployMalformedResponse(message)
            }
            DeployError::Packaging(source) => source.into(),
        }
    }
}

// ============================================================================
// Response interpretation
// ============================================================================

#[derive(Debug, Deserialize)]
struct DeployResponse {
    #[serde(rename = "vercelProjectUrl")]
    vercel_project_url: Option<String>,
    error: Option<String>,
}

/// Interpret the endpoint's answer. Pure; the transport is handled by
/// [`DeployClient::deploy`].
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, DeployError> {
    let parsed: DeployResponse = serde_json::from_str(body)
        .map_err(|e| DeployError::MalformedResponse(format!("{e}: {body}")))?;

    if let Some(error) = parsed.error {
        return Err(DeployError::Rejected(error));
    }
    if !status.is_success() {
        return Err(DeployError::MalformedResponse(format!(
            "status {status} without an error message"
        )));
    }
    parsed.vercel_project_url.ok_or_else(|| {
        DeployError::MalformedResponse("success response missing vercelProjectUrl".to_string())
    })
}

// ============================================================================
// Client
// ============================================================================

/// Uploads archived bundles to the deploy endpoint
#[derive(Debug, Clone)]
pub struct DeployClient {
    client: reqwest::Client,
    config: ExportConfig,
}

impl DeployClient {
    /// Create a client honoring the config's request timeout
    pub fn new(config: &ExportConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Assemble, archive and upload the markup; returns the deployed
    /// project URL.
    pub async fn deploy(&self, markup: &str) -> Result<String, DeployError> {
        let bundle = assemble_bundle(markup, &self.config)?;
        let bytes = archive_bundle(&bundle)?;

        let part = Part::bytes(bytes)
            .file_name(ARCHIVE_FILENAME)
            .mime_str("application/zip")
            .map_err(|e| DeployError::Request(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.config.deploy_endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.config.deploy_endpoint, error = %e, "deploy upload failed");
                if e.is_timeout() {
                    DeployError::TimedOut
                } else {
                    DeployError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeployError::Request(e.to_string()))?;

        let url = interpret_response(status, &body).map_err(|e| {
            tracing::error!(endpoint = %self.config.deploy_endpoint, %status, error = %e, "deploy rejected");
            e
        })?;
        tracing::debug!(%url, "deploy succeeded");
        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================
