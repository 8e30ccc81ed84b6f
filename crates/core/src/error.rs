//! Error types for Pagewright
//!
//! This module provides unified error handling across the block subsystem:
//! registry lookups, remote data fetches, bundle packaging, and deploy
//! submissions. Individual crates define narrower error enums at their own
//! boundaries; everything converts into [`BuilderError`] for callers that
//! want a single type.

use thiserror::Error;

/// The main error type for the Pagewright subsystem
#[derive(Debug, Error)]
pub enum BuilderError {
    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// A block definition with this id is already registered
    #[error("Block id collision: '{0}' is already registered")]
    RegistryCollision(String),

    /// No block definition registered under this id
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// A component type referenced by a structured block is unknown
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    // ========================================================================
    // Fetch Errors (data-bound blocks)
    // ========================================================================
    /// The remote data request failed at the transport level
    #[error("Data fetch failed for '{url}': {message}")]
    FetchRequest { url: String, message: String },

    /// The remote endpoint answered with a non-success status
    #[error("Data fetch for '{url}' returned status {status}")]
    FetchStatus { url: String, status: u16 },

    /// The response body did not match the expected payload shape
    #[error("Malformed data payload from '{url}': {message}")]
    MalformedPayload { url: String, message: String },

    // ========================================================================
    // Export Errors
    // ========================================================================
    /// Two bundle files were assembled under the same relative path
    #[error("Duplicate bundle path: {0}")]
    DuplicateBundlePath(String),

    /// Writing the in-memory archive failed
    #[error("Archive packaging failed: {0}")]
    Archive(String),

    // ========================================================================
    // Deploy Errors
    // ========================================================================
    /// The deploy upload failed at the transport level
    #[error("Deploy submission failed: {0}")]
    DeployRequest(String),

    /// The deploy endpoint did not answer within the configured timeout
    #[error("Deploy submission timed out")]
    DeployTimedOut,

    /// The deploy endpoint rejected the bundle and returned an error message
    #[error("Deployment failed: {0}")]
    DeployRejected(String),

    /// The deploy endpoint answered with a body that is not valid JSON
    #[error("Deploy endpoint returned a malformed response: {0}")]
    DeployMalformedResponse(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl BuilderError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        BuilderError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        BuilderError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error came from a remote data fetch
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            BuilderError::FetchRequest { .. }
                | BuilderError::FetchStatus { .. }
                | BuilderError::MalformedPayload { .. }
        )
    }

    /// Check if this error came from a deploy submission
    pub fn is_deploy(&self) -> bool {
        matches!(
            self,
            BuilderError::DeployRequest(_)
                | BuilderError::DeployTimedOut
                | BuilderError::DeployRejected(_)
                | BuilderError::DeployMalformedResponse(_)
        )
    }

    /// Check if this error is a registry lookup/registration error
    pub fn is_registry(&self) -> bool {
        matches!(
            self,
            BuilderError::RegistryCollision(_)
                | BuilderError::BlockNotFound(_)
                | BuilderError::UnknownComponentType(_)
        )
    }
}

/// Result type alias using BuilderError
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> BuilderResult<T>;
}

impl<T, E: Into<BuilderError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> BuilderResult<T> {
        self.map_err(|e| {
            let err: BuilderError = e.into();
            BuilderError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_errors() {
        let err = BuilderError::RegistryCollision("section".to_string());
        assert!(err.is_registry());
        assert!(!err.is_fetch());
        assert_eq!(
            err.to_string(),
            "Block id collision: 'section' is already registered"
        );

        let err = BuilderError::BlockNotFound("navbar".to_string());
        assert!(err.is_registry());
        assert_eq!(err.to_string(), "Block not found: navbar");
    }

    #[test]
    fn test_fetch_error_classification() {
        let err = BuilderError::FetchStatus {
            url: "http://localhost:3000/products".to_string(),
            status: 502,
        };
        assert!(err.is_fetch());
        assert!(!err.is_deploy());
        assert_eq!(
            err.to_string(),
            "Data fetch for 'http://localhost:3000/products' returned status 502"
        );
    }

    #[test]
    fn test_deploy_errors_carry_server_text_verbatim() {
        let err = BuilderError::DeployRejected("quota exceeded".to_string());
        assert!(err.is_deploy());
        assert_eq!(err.to_string(), "Deployment failed: quota exceeded");

        let err = BuilderError::DeployTimedOut;
        assert!(err.is_deploy());
    }

    #[test]
    fn test_error_with_context() {
        let err = BuilderError::with_context("Assembling bundle", "duplicate path");
        assert_eq!(err.to_string(), "Assembling bundle: duplicate path");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: BuilderError = json_err.into();
        assert!(matches!(err, BuilderError::JsonSerialization(_)));
    }
}
