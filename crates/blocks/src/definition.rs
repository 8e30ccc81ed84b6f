//! Block definitions and the capability contract
//!
//! A [`BlockDefinition`] is registered once and never mutated afterwards.
//! Its [`Capabilities`] describe how a placed component may be manipulated
//! on the canvas; the behavior enforcer fills in anything a block left
//! unset.

use pagewright_core::{Geometry, StyleMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// PositionSync
// ============================================================================

/// Callback invoked with the new geometry after every drag or resize.
///
/// The default sync writes `width`, `height`, `top`, and `left` back into
/// the component's style map so the element keeps its absolute placement.
#[derive(Clone)]
pub struct PositionSync(Arc<dyn Fn(&mut StyleMap, &Geometry) + Send + Sync>);

impl PositionSync {
    /// Create a sync callback from a closure
    pub fn new(f: impl Fn(&mut StyleMap, &Geometry) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// The default callback: write the element's absolute geometry into its
    /// style map as pixel values
    pub fn write_geometry() -> Self {
        Self::new(|style, geometry| {
            style.set("width", Geometry::px(geometry.size.width));
            style.set("height", Geometry::px(geometry.size.height));
            style.set("top", Geometry::px(geometry.position.top));
            style.set("left", Geometry::px(geometry.position.left));
        })
    }

    /// Invoke the callback
    pub fn apply(&self, style: &mut StyleMap, geometry: &Geometry) {
        (self.0)(style, geometry)
    }
}

impl Default for PositionSync {
    fn default() -> Self {
        Self::write_geometry()
    }
}

impl fmt::Debug for PositionSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PositionSync")
    }
}

// ============================================================================
// ResizeSpec
// ============================================================================

/// Per-handle resize configuration: one flag per corner and edge midpoint,
/// plus the optional position-sync callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeSpec {
    /// Top left
    pub tl: bool,
    /// Top center
    pub tc: bool,
    /// Top right
    pub tr: bool,
    /// Center left
    pub cl: bool,
    /// Center right
    pub cr: bool,
    /// Bottom left
    pub bl: bool,
    /// Bottom center
    pub bc: bool,
    /// Bottom right
    pub br: bool,

    /// Geometry sync callback, run after each resize/drag completion
    #[serde(skip)]
    pub sync: Option<PositionSync>,
}

impl ResizeSpec {
    /// All eight handles enabled, no sync callback attached yet
    pub fn all_handles() -> Self {
        Self {
            tl: true,
            tc: true,
            tr: true,
            cl: true,
            cr: true,
            bl: true,
            bc: true,
            br: true,
            sync: None,
        }
    }

    /// Only the horizontal edge handles (used by text blocks that should
    /// stretch sideways without changing line height)
    pub fn horizontal() -> Self {
        Self {
            cl: true,
            cr: true,
            ..Self::none()
        }
    }

    /// No handles enabled
    pub fn none() -> Self {
        Self {
            tl: false,
            tc: false,
            tr: false,
            cl: false,
            cr: false,
            bl: false,
            bc: false,
            br: false,
            sync: None,
        }
    }

    /// Attach a sync callback
    pub fn with_sync(mut self, sync: PositionSync) -> Self {
        self.sync = Some(sync);
        self
    }

    /// Whether any handle is enabled
    pub fn any_enabled(&self) -> bool {
        self.tl || self.tc || self.tr || self.cl || self.cr || self.bl || self.bc || self.br
    }

    /// Whether a sync callback is attached
    pub fn has_sync(&self) -> bool {
        self.sync.is_some()
    }

    /// Enabled handle names, in canvas order
    pub fn enabled_handles(&self) -> Vec<&'static str> {
        let flags = [
            ("tl", self.tl),
            ("tc", self.tc),
            ("tr", self.tr),
            ("cl", self.cl),
            ("cr", self.cr),
            ("bl", self.bl),
            ("bc", self.bc),
            ("br", self.br),
        ];
        flags
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }
}

impl Default for ResizeSpec {
    fn default() -> Self {
        Self::all_handles()
    }
}

// ============================================================================
// Resizable / Capabilities
// ============================================================================

/// A block's resize declaration: blanket `true` or an explicit handle spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Resizable {
    /// Every handle enabled (the boolean `true` form)
    All,
    /// Explicit per-handle configuration
    Handles(ResizeSpec),
}

impl Resizable {
    /// Normalize into a concrete handle spec
    pub fn into_spec(self) -> ResizeSpec {
        match self {
            Resizable::All => ResizeSpec::all_handles(),
            Resizable::Handles(spec) => spec,
        }
    }

    /// Borrowing view of the handle spec, materializing the `All` form
    pub fn to_spec(&self) -> ResizeSpec {
        self.clone().into_spec()
    }
}

/// Interaction capabilities declared by a block or component type.
///
/// `None` means "unset": the behavior enforcer will fill in the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub draggable: Option<bool>,
    pub resizable: Option<Resizable>,
}

impl Capabilities {
    /// Unset capabilities (the enforcer decides everything)
    pub fn unset() -> Self {
        Self::default()
    }

    /// Explicitly draggable with every resize handle enabled
    pub fn draggable_resizable() -> Self {
        Self {
            draggable: Some(true),
            resizable: Some(Resizable::All),
        }
    }

    /// Explicit draggable flag with a concrete handle spec
    pub fn with_handles(spec: ResizeSpec) -> Self {
        Self {
            draggable: Some(true),
            resizable: Some(Resizable::Handles(spec)),
        }
    }

    /// Whether both placement capabilities are explicitly declared
    pub fn is_complete(&self) -> bool {
        self.draggable.is_some() && self.resizable.is_some()
    }
}

// ============================================================================
// Traits (user-editable fields)
// ============================================================================

/// Kind of a user-editable trait field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitKind {
    Text,
    Number,
}

/// A user-editable field exposed in the trait panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDef {
    pub kind: TraitKind,
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl TraitDef {
    /// Create a text trait
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: TraitKind::Text,
            name: name.into(),
            label: label.into(),
            value: String::new(),
        }
    }

    /// Create a number trait
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: TraitKind::Number,
            name: name.into(),
            label: label.into(),
            value: String::new(),
        }
    }

    /// Set the initial value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

// ============================================================================
// BlockContent
// ============================================================================

/// The content a block drops onto the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BlockContent {
    /// A literal markup template
    Markup(String),
    /// A structured descriptor referencing a named component type
    Component {
        component_type: String,
        /// Initial attributes applied to the created element
        attributes: Vec<(String, String)>,
        /// Whether the component activates immediately after render
        active_on_render: bool,
        /// Container markup dropped with the component; visible before the
        /// component's first data fetch resolves
        shell: Option<String>,
    },
}

impl BlockContent {
    /// Shorthand for a markup template
    pub fn markup(template: impl Into<String>) -> Self {
        BlockContent::Markup(template.into())
    }

    /// Shorthand for a structured descriptor without shell markup
    pub fn component(component_type: impl Into<String>) -> Self {
        BlockContent::Component {
            component_type: component_type.into(),
            attributes: Vec::new(),
            active_on_render: false,
            shell: None,
        }
    }

    /// The container markup dropped onto the canvas, when the content
    /// carries any
    pub fn shell_markup(&self) -> Option<&str> {
        match self {
            BlockContent::Markup(template) => Some(template),
            BlockContent::Component { shell, .. } => shell.as_deref(),
        }
    }
}

// ============================================================================
// BlockDefinition
// ============================================================================

/// A catalogued block, immutable after registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Unique key within the registry
    pub id: String,

    /// Display text shown in the block panel (may itself be markup)
    pub label: String,

    /// Content dropped onto the canvas
    pub content: BlockContent,

    /// Grouping key; categories are created implicitly on first use
    pub category: String,

    /// Panel icon class (e.g. `fa fa-th-large`)
    pub icon: Option<String>,

    /// Interaction capabilities inherited by placed components
    pub capabilities: Capabilities,

    /// CSS rules shipped with the block (styling preset data)
    pub style: Option<String>,
}

impl BlockDefinition {
    /// Create a definition with unset capabilities
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        content: BlockContent,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content,
            category: category.into(),
            icon: None,
            capabilities: Capabilities::unset(),
            style: None,
        }
    }

    /// Set the panel icon class
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the capability declaration
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Attach CSS rules shipped with the block
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

// ============================================================================
// ComponentTypeDefaults
// ============================================================================

/// Registry-side defaults for a named component type.
///
/// Structured blocks reference a component type instead of literal markup;
/// the type's defaults supply capabilities and trait fields for every
/// instance created from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentTypeDefaults {
    pub component_type: String,
    pub capabilities: Capabilities,
    pub traits: Vec<TraitDef>,
}

impl ComponentTypeDefaults {
    /// Create defaults with unset capabilities and no traits
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            capabilities: Capabilities::unset(),
            traits: Vec::new(),
        }
    }

    /// Set the capability declaration
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Add a trait field
    pub fn with_trait(mut self, trait_def: TraitDef) -> Self {
        self.traits.push(trait_def);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
