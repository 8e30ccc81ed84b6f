//! # Pagewright Core
//!
//! Core types and traits shared by every Pagewright crate.
//!
//! This crate defines the foundation the block subsystem is built on:
//!
//! - **Errors**: the unified [`BuilderError`] taxonomy and [`BuilderResult`]
//! - **Geometry**: canvas [`Position`], [`Size`], and [`Geometry`] primitives
//! - **Styles**: the insertion-ordered [`StyleMap`] carried by every placed
//!   component
//! - **Traits**: small seams ([`Identifiable`], [`Named`], [`Validatable`])
//!   implemented across the workspace

// ============================================================================
// Modules
// ============================================================================

pub mod error;
pub mod geometry;
pub mod style;
pub mod traits;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{BuilderError, BuilderResult, ResultExt};
pub use geometry::{Geometry, Position, Size};
pub use style::StyleMap;
pub use traits::{Identifiable, Named, Validatable};
