//! # Pagewright
//!
//! Block authoring and export subsystem for a visual web page builder.
//!
//! The workspace is split into four focused crates, re-exported here:
//!
//! - [`core`](pagewright_core) — shared error taxonomy, geometry and style
//!   primitives
//! - [`blocks`](pagewright_blocks) — the block template registry and stock
//!   catalog
//! - [`engine`](pagewright_engine) — the component behavior enforcer and
//!   the data-bound block state machine
//! - [`export`](pagewright_export) — bundle assembly, zip archiving and
//!   the deploy client
//!
//! ## Quick start
//!
//! ```no_run
//! use pagewright::prelude::*;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = BlockRegistry::new();
//! register_stock_blocks(&registry)?;
//!
//! let definition = registry.get("section")?;
//! let mut component = ComponentInstance::from_definition(&definition);
//! enforce_on_create(&mut component, &registry);
//!
//! let artifact = export_download("<section>Hi</section>", &ExportConfig::default())?;
//! # let _ = artifact;
//! # Ok(())
//! # }
//! ```

pub use pagewright_blocks as blocks;
pub use pagewright_core as core;
pub use pagewright_engine as engine;
pub use pagewright_export as export;

/// Commonly used types, one import away
pub mod prelude {
    pub use pagewright_blocks::{
        register_stock_blocks, resolve_class_conflicts, BlockContent, BlockDefinition,
        BlockRegistry, Capabilities, ComponentTypeDefaults, RegistryError, Resizable, ResizeSpec,
        TraitDef, TraitKind,
    };
    pub use pagewright_core::{BuilderError, BuilderResult, Geometry, StyleMap};
    pub use pagewright_engine::{
        apply_geometry, enforce_on_create, enforce_placement, BlockRenderer, ComponentInstance,
        DataBoundBlock, DataFetcher, EngineConfig, HttpFetcher, RenderState, StructuredRenderer,
        TemplatedRenderer,
    };
    pub use pagewright_export::{
        export_download, DeployClient, DeployError, DownloadArtifact, ExportConfig,
    };
}

/// Initialize logging for hosts embedding the subsystem.
///
/// Honors `RUST_LOG` when set, defaults to `info` otherwise. Safe to call
/// once at startup.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
