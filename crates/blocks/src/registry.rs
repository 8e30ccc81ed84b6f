//! Block Template Registry
//!
//! Shared, read-mostly catalog of block definitions and component-type
//! defaults. Written during initialization, read for the lifetime of the
//! editor session.
//!
//! Duplicate ids are a bug surface, not a feature: `register` rejects a
//! colliding id with [`RegistryError::Collision`] instead of overwriting
//! silently. Callers that genuinely want replacement opt in through
//! [`BlockRegistry::register_overwrite`], which returns the displaced
//! definition and logs a warning.

use crate::definition::{BlockDefinition, ComponentTypeDefaults};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A definition with this id is already registered
    #[error("Block id collision: '{0}' is already registered")]
    Collision(String),

    /// No definition registered under this id
    #[error("Block not found: {0}")]
    NotFound(String),
}

impl From<RegistryError> for pagewright_core::BuilderError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Collision(id) => pagewright_core::BuilderError::RegistryCollision(id),
            RegistryError::NotFound(id) => pagewright_core::BuilderError::BlockNotFound(id),
        }
    }
}

/// One category with its definitions in registration order
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    /// Category key
    pub id: String,
    /// Display label (defaults to the key when never pre-registered)
    pub label: String,
    /// Definitions in registration order
    pub blocks: Vec<Arc<BlockDefinition>>,
}

#[derive(Default)]
struct RegistryState {
    definitions: HashMap<String, Arc<BlockDefinition>>,
    /// Registration order of block ids
    order: Vec<String>,
    /// Categories in order of first appearance or pre-registration
    categories: Vec<String>,
    category_labels: HashMap<String, String>,
    component_types: HashMap<String, Arc<ComponentTypeDefaults>>,
}

impl RegistryState {
    fn note_category(&mut self, category: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
    }
}

/// Block registry handle; cheap to clone, shared process-wide
#[derive(Clone, Default)]
pub struct BlockRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl BlockRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a block definition.
    ///
    /// Registering introduces the definition's category if it is referenced
    /// for the first time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Collision`] if the id is already taken; the
    /// existing definition is left untouched.
    pub fn register(&self, definition: BlockDefinition) -> Result<(), RegistryError> {
        let mut state = self.state.write();

        if state.definitions.contains_key(&definition.id) {
            return Err(RegistryError::Collision(definition.id));
        }

        state.note_category(&definition.category);
        state.order.push(definition.id.clone());
        state
            .definitions
            .insert(definition.id.clone(), Arc::new(definition));
        Ok(())
    }

    /// Register a block definition, replacing any existing one.
    ///
    /// Returns the displaced definition when the id was already taken.
    pub fn register_overwrite(
        &self,
        definition: BlockDefinition,
    ) -> Option<Arc<BlockDefinition>> {
        let mut state = self.state.write();

        state.note_category(&definition.category);
        let id = definition.id.clone();
        let previous = state.definitions.insert(id.clone(), Arc::new(definition));

        if previous.is_some() {
            tracing::warn!(block_id = %id, "overwriting existing block definition");
        } else {
            state.order.push(id);
        }
        previous
    }

    /// Pre-register a category with a display label.
    ///
    /// Categories created implicitly by `register` use the key as label.
    pub fn add_category(&self, id: impl Into<String>, label: impl Into<String>) {
        let id = id.into();
        let mut state = self.state.write();
        state.note_category(&id);
        state.category_labels.insert(id, label.into());
    }

    /// Register defaults for a named component type
    pub fn register_component_type(&self, defaults: ComponentTypeDefaults) {
        let mut state = self.state.write();
        state
            .component_types
            .insert(defaults.component_type.clone(), Arc::new(defaults));
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get a definition by id
    pub fn get(&self, id: &str) -> Result<Arc<BlockDefinition>, RegistryError> {
        let state = self.state.read();
        state
            .definitions
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Get the defaults for a named component type
    pub fn component_type(&self, name: &str) -> Option<Arc<ComponentTypeDefaults>> {
        let state = self.state.read();
        state.component_types.get(name).cloned()
    }

    /// Check if a definition with the given id exists
    pub fn contains(&self, id: &str) -> bool {
        self.state.read().definitions.contains_key(id)
    }

    /// Number of registered definitions
    pub fn count(&self) -> usize {
        self.state.read().definitions.len()
    }

    /// Number of known categories
    pub fn category_count(&self) -> usize {
        self.state.read().categories.len()
    }

    /// List definitions grouped by category.
    ///
    /// Categories appear in order of first registration or explicit
    /// pre-registration; definitions keep registration order within each
    /// category. The returned snapshot is finite and restartable.
    pub fn list_by_category(&self) -> Vec<CategoryGroup> {
        let state = self.state.read();

        state
            .categories
            .iter()
            .map(|category| {
                let blocks = state
                    .order
                    .iter()
                    .filter_map(|id| state.definitions.get(id))
                    .filter(|def| def.category == *category)
                    .cloned()
                    .collect();
                CategoryGroup {
                    id: category.clone(),
                    label: state
                        .category_labels
                        .get(category)
                        .cloned()
                        .unwrap_or_else(|| category.clone()),
                    blocks,
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
