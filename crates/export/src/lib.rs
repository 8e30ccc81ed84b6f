//! # Pagewright Export
//!
//! Turns finished canvas markup into a runnable Vite + React project:
//!
//! - [`rewrite`] — HTML to JSX attribute rewriting and entry-component
//!   wrapping
//! - [`bundle`] — the fixed six-file project bundle and [`ExportConfig`]
//! - [`archive`] — reproducible in-memory zip packaging and download mode
//! - [`deploy`] — multipart upload of the archive to the deploy endpoint
//!
//! Download and deploy both go through [`assemble_bundle`] and
//! [`archive_bundle`], so the archive the user downloads is byte for byte
//! the one that gets deployed.

// ============================================================================
// Modules
// ============================================================================

pub mod archive;
pub mod bundle;
pub mod deploy;
pub mod rewrite;

// ============================================================================
// Re-exports
// ============================================================================

pub use archive::{archive_bundle, export_download, DownloadArtifact, ARCHIVE_FILENAME};
pub use bundle::{assemble_bundle, BundleFile, ExportBundle, ExportConfig, ExportError};
pub use deploy::{interpret_response, DeployClient, DeployError};
pub use rewrite::{rewrite_markup, wrap_entry_component};
