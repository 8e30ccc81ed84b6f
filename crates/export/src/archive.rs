//! In-memory zip archiving
//!
//! The bundle is zipped entirely in memory; nothing touches the
//! filesystem. Entries use a constant modification time and fixed
//! compression options so the same bundle always archives to the same
//! bytes.

use crate::bundle::{assemble_bundle, ExportBundle, ExportConfig, ExportError};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Fixed filename of the downloaded archive
pub const ARCHIVE_FILENAME: &str = "vite-react-project.zip";

/// A finished archive ready to hand to the browser's download path
#[derive(Debug, Clone)]
pub struct DownloadArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Write the bundle into a zip archive, entries in bundle order.
pub fn archive_bundle(bundle: &ExportBundle) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // Constant timestamp keeps identical bundles byte-identical.
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for file in bundle.files() {
        writer
            .start_file(&file.path, options)
            .map_err(|e| ExportError::Archive(e.to_string()))?;
        writer
            .write_all(file.content.as_bytes())
            .map_err(|e| ExportError::Archive(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ExportError::Archive(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Download mode: assemble, archive, and name the artifact.
pub fn export_download(
    markup: &str,
    config: &ExportConfig,
) -> Result<DownloadArtifact, ExportError> {
    let bundle = assemble_bundle(markup, config)?;
    let bytes = archive_bundle(&bundle)?;
    tracing::debug!(size = bytes.len(), "archived export bundle");
    Ok(DownloadArtifact {
        filename: ARCHIVE_FILENAME.to_string(),
        bytes,
    })
}

// ============================================================================
// Tests
// ============================================================================
