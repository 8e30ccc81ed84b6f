//! # Pagewright Engine
//!
//! The runtime half of the block subsystem:
//!
//! - [`component`] — [`ComponentInstance`], the live occurrence of a block
//!   on the canvas
//! - [`enforcer`] — the Component Behavior Enforcer that normalizes
//!   drag/resize/position behavior on every component-creation event
//! - [`fetch`] — the [`DataFetcher`] seam and the reqwest-backed
//!   [`HttpFetcher`]
//! - [`databound`] — the per-instance fetch/render state machine with
//!   timer-driven refresh and deterministic destruction
//! - [`templated`] / [`structured`] — the two data-bound block flavors

// ============================================================================
// Modules
// ============================================================================

pub mod component;
pub mod databound;
pub mod enforcer;
pub mod fetch;
pub mod structured;
pub mod templated;

// ============================================================================
// Re-exports
// ============================================================================

pub use component::ComponentInstance;
pub use databound::{BlockRenderer, DataBoundBlock, EngineConfig, RenderState};
pub use enforcer::{apply_geometry, enforce_on_create, enforce_placement};
pub use fetch::{DataFetcher, FetchError, HttpFetcher};
pub use structured::{ProductRecord, StructuredRenderer};
pub use templated::TemplatedRenderer;
