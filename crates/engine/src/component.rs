//! Live component instances
//!
//! A [`ComponentInstance`] is created when a block is dropped onto the
//! canvas. It inherits capabilities from its block definition (or from its
//! component type's defaults) and owns its style map and trait list
//! exclusively; nothing mutates one instance from another.

use pagewright_blocks::{BlockDefinition, Capabilities, ComponentTypeDefaults, TraitDef};
use pagewright_core::{Identifiable, StyleMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed occurrence of a block on the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// Unique instance id
    pub id: Uuid,

    /// The registry id of the originating block definition
    pub definition_id: String,

    /// Declared component type, when the block used a structured descriptor
    pub component_type: Option<String>,

    /// Placement capabilities (normalized by the behavior enforcer)
    pub capabilities: Capabilities,

    /// Mutable style map; `position: absolute` once placement is enabled
    pub style: StyleMap,

    /// User-editable trait fields, in declaration order
    pub traits: Vec<TraitDef>,
}

impl ComponentInstance {
    /// Create a bare instance with unset capabilities
    pub fn new(definition_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            definition_id: definition_id.into(),
            component_type: None,
            capabilities: Capabilities::unset(),
            style: StyleMap::new(),
            traits: Vec::new(),
        }
    }

    /// Create an instance from a block definition, inheriting its
    /// capabilities and (for structured content) its component type
    pub fn from_definition(definition: &BlockDefinition) -> Self {
        let mut instance = Self::new(&definition.id);
        instance.capabilities = definition.capabilities.clone();
        if let pagewright_blocks::BlockContent::Component { component_type, .. } =
            &definition.content
        {
            instance.component_type = Some(component_type.clone());
        }
        instance
    }

    /// Merge in the defaults of the instance's declared component type:
    /// unset capabilities and missing trait fields are filled from the type.
    pub fn apply_type_defaults(&mut self, defaults: &ComponentTypeDefaults) {
        if self.capabilities.draggable.is_none() {
            self.capabilities.draggable = defaults.capabilities.draggable;
        }
        if self.capabilities.resizable.is_none() {
            self.capabilities.resizable = defaults.capabilities.resizable.clone();
        }
        for trait_def in &defaults.traits {
            if !self.traits.iter().any(|t| t.name == trait_def.name) {
                self.traits.push(trait_def.clone());
            }
        }
    }

    /// Get a trait value by name
    pub fn trait_value(&self, name: &str) -> Option<&str> {
        self.traits
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }

    /// Set a trait value by name; returns false if no such trait exists
    pub fn set_trait_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.traits.iter_mut().find(|t| t.name == name) {
            Some(trait_def) => {
                trait_def.value = value.into();
                true
            }
            None => false,
        }
    }
}

impl Identifiable for ComponentInstance {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// Tests
// ============================================================================
