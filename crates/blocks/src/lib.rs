//! # Pagewright Blocks
//!
//! The Block Template Registry: the static catalog of authorable blocks a
//! page author can drop onto the canvas.
//!
//! - [`definition`] — [`BlockDefinition`], block content forms, and the
//!   capability contract ([`Capabilities`], [`ResizeSpec`], [`PositionSync`])
//! - [`registry`] — the shared, read-mostly [`BlockRegistry`] with explicit
//!   collision handling and ordered category listing
//! - [`classes`] — pure class-conflict resolution for layout utility classes
//! - [`catalog`] — the stock block set (sections, forms, navigation,
//!   data-bound shells) recovered from the reference page builder

// ============================================================================
// Modules
// ============================================================================

pub mod catalog;
pub mod classes;
pub mod definition;
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use catalog::{register_stock_blocks, stock_component_types, stock_definitions};
pub use classes::resolve_class_conflicts;
pub use definition::{
    BlockContent, BlockDefinition, Capabilities, ComponentTypeDefaults, PositionSync, Resizable,
    ResizeSpec, TraitDef, TraitKind,
};
pub use registry::{BlockRegistry, CategoryGroup, RegistryError};
