//! Project bundle assembly
//!
//! Every export mode starts here: the canvas markup is rewritten to JSX
//! and placed into a fixed six-file Vite + React project layout. The same
//! markup always assembles into the same bundle, file for file, which is
//! what makes the archive step reproducible.

use crate::rewrite::{rewrite_markup, wrap_entry_component};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Export pipeline configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Package name written into the generated `package.json`
    pub project_name: String,
    /// Endpoint the deploy client POSTs the archived bundle to
    pub deploy_endpoint: String,
    /// Timeout for the deploy upload request
    pub request_timeout: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            project_name: "vite-react-app".to_string(),
            deploy_endpoint: "http://localhost:3000/deploy".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated package name
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Set the deploy endpoint URL
    pub fn with_deploy_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.deploy_endpoint = endpoint.into();
        self
    }

    /// Set the deploy request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors produced while assembling or archiving a bundle
#[derive(Debug, Error)]
pub enum ExportError {
    /// Two files were assembled under the same relative path
    #[error("duplicate bundle path: {0}")]
    DuplicatePath(String),

    /// Writing the in-memory archive failed
    #[error("archive packaging failed: {0}")]
    Archive(String),

    /// Serializing the package manifest failed
    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl From<ExportError> for pagewright_core::BuilderError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::DuplicatePath(path) => {
                pagewright_core::BuilderError::DuplicateBundlePath(path)
            }
            ExportError::Archive(message) => pagewright_core::BuilderError::Archive(message),
            ExportError::Manifest(source) => {
                pagewright_core::BuilderError::JsonSerialization(source)
            }
        }
    }
}

// ============================================================================
// Bundle model
// ============================================================================

/// One file of the exported project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    /// Relative path inside the project, forward slashes
    pub path: String,
    pub content: String,
}

impl BundleFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// The assembled project, in fixed file order
#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    files: Vec<BundleFile>,
}

impl ExportBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; rejects a path already present in the bundle
    pub fn push(&mut self, file: BundleFile) -> Result<(), ExportError> {
        if self.files.iter().any(|f| f.path == file.path) {
            return Err(ExportError::DuplicatePath(file.path));
        }
        self.files.push(file);
        Ok(())
    }

    /// Files in assembly order
    pub fn files(&self) -> &[BundleFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a file's content by path
    pub fn content(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }
}

// ============================================================================
// Assembly
// ============================================================================

fn package_manifest(config: &ExportConfig) -> Result<String, ExportError> {
    let manifest = json!({
        "name": config.project_name,
        "private": true,
        "version": "0.0.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0"
        },
        "devDependencies": {
            "@vitejs/plugin-react": "^4.0.0",
            "autoprefixer": "^10.4.14",
            "postcss": "^8.4.24",
            "tailwindcss": "^3.3.2",
            "vite": "^4.3.9"
        }
    });
    let mut rendered = serde_json::to_string_pretty(&manifest)?;
    rendered.push('\n');
    Ok(rendered)
}

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Exported Page</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.jsx"></script>
  </body>
</html>
"#;

const MAIN_JSX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App.jsx';
import './index.css';

ReactDOM.createRoot(document.getElementById('root')).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"#;

const INDEX_CSS: &str = "/* Page styles are carried inline by the exported markup. */\n";

/// Assemble the canvas markup into the six-file Vite + React project.
///
/// File order is fixed: `package.json`, `vite.config.js`, `index.html`,
/// `src/main.jsx`, `src/App.jsx`, `src/index.css`.
pub fn assemble_bundle(markup: &str, config: &ExportConfig) -> Result<ExportBundle, ExportError> {
    let entry = wrap_entry_component(&rewrite_markup(markup));

    let mut bundle = ExportBundle::new();
    bundle.push(BundleFile::new("package.json", package_manifest(config)?))?;
    bundle.push(BundleFile::new("vite.config.js", VITE_CONFIG))?;
    bundle.push(BundleFile::new("index.html", INDEX_HTML))?;
    bundle.push(BundleFile::new("src/main.jsx", MAIN_JSX))?;
    bundle.push(BundleFile::new("src/App.jsx", entry))?;
    bundle.push(BundleFile::new("src/index.css", INDEX_CSS))?;

    tracing::debug!(files = bundle.len(), "assembled export bundle");
    Ok(bundle)
}

// ============================================================================
// Tests
// ============================================================================
