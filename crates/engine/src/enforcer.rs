//! Component Behavior Enforcer
//!
//! Fires once per component-creation event and guarantees that every
//! component capable of manual placement behaves consistently, whichever
//! block produced it. Postcondition: draggable implies some resize
//! contract, implies `position: absolute`, implies a position-sync
//! callback is attached. No component is ever left partially configured.

use crate::component::ComponentInstance;
use pagewright_blocks::{BlockRegistry, ComponentTypeDefaults, PositionSync, Resizable, ResizeSpec};
use pagewright_core::Geometry;

/// Normalize a freshly created component's placement behavior.
///
/// 1. If the declared component type already carries a complete contract
///    (explicit draggable + resizable) and the component is absolutely
///    positioned, only the resize declaration is normalized (sync callback
///    attached); handles and draggable stay as declared.
/// 2. `draggable` defaults to `true` when unset.
/// 3. An unset `resizable` gets the full 8-handle spec. Handles a block
///    explicitly disabled are never re-enabled; a spec without a sync
///    callback gets the default geometry-writing one.
/// 4. `position` is forced to `absolute`.
pub fn enforce_placement(
    component: &mut ComponentInstance,
    type_defaults: Option<&ComponentTypeDefaults>,
) {
    if let Some(defaults) = type_defaults {
        component.apply_type_defaults(defaults);

        let absolute = component.style.get("position") == Some("absolute");
        if defaults.capabilities.is_complete() && absolute {
            // The type fully specifies placement behavior; even so, the
            // resize contract must end up a synced handle spec, or
            // completed gestures would never write geometry back.
            normalize_resize_contract(component);
            return;
        }
    }

    if component.capabilities.draggable.is_none() {
        component.capabilities.draggable = Some(true);
        tracing::debug!(component = %component.id, "defaulted draggable to true");
    }

    normalize_resize_contract(component);

    if component.style.get("position") != Some("absolute") {
        component.style.set("position", "absolute");
        tracing::debug!(component = %component.id, "forced position: absolute");
    }
}

/// Collapse the resize declaration into an explicit handle spec with a
/// sync callback attached. Handles already disabled stay disabled.
fn normalize_resize_contract(component: &mut ComponentInstance) {
    let spec = match component.capabilities.resizable.take() {
        None => {
            tracing::debug!(component = %component.id, "installed default resize handles");
            ResizeSpec::all_handles().with_sync(PositionSync::write_geometry())
        }
        Some(resizable) => {
            let mut spec = resizable.into_spec();
            if spec.sync.is_none() {
                spec.sync = Some(PositionSync::write_geometry());
            }
            spec
        }
    };
    component.capabilities.resizable = Some(Resizable::Handles(spec));
}

/// Convenience wrapper resolving the component type's defaults from the
/// registry before enforcing.
pub fn enforce_on_create(component: &mut ComponentInstance, registry: &BlockRegistry) {
    let defaults = component
        .component_type
        .as_deref()
        .and_then(|name| registry.component_type(name));
    enforce_placement(component, defaults.as_deref());
}

/// Run the component's position-sync callback with the geometry reported
/// by a completed drag or resize gesture.
pub fn apply_geometry(component: &mut ComponentInstance, geometry: &Geometry) {
    let sync = match &component.capabilities.resizable {
        Some(Resizable::Handles(spec)) => spec.sync.clone(),
        Some(Resizable::All) | None => None,
    };
    if let Some(sync) = sync {
        sync.apply(&mut component.style, geometry);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_blocks::{register_stock_blocks, Capabilities, TraitDef};

    fn placement_spec(component: &ComponentInstance) -> ResizeSpec {
        match component.capabilities.resizable.as_ref().unwrap() {
            Resizable::Handles(spec) => spec.clone(),
            Resizable::All => panic!("enforcement should normalize to explicit handles"),
        }
    }

    #[test]
    fn test_bare_component_gets_full_contract() {
        let mut component = ComponentInstance::new("text");
        enforce_placement(&mut component, None);

        assert_eq!(component.capabilities.draggable, Some(true));
        let spec = placement_spec(&component);
        assert!(spec.any_enabled());
        assert!(spec.has_sync());
        assert_eq!(component.style.get("position"), Some("absolute"));
    }

    #[test]
    fn test_disabled_handles_never_reenabled() {
        let mut component = ComponentInstance::new("heading");
        component.capabilities = Capabilities::with_handles(ResizeSpec::horizontal());
        enforce_placement(&mut component, None);

        let spec = placement_spec(&component);
        assert_eq!(spec.enabled_handles(), vec!["cl", "cr"]);
        // The sync callback was still attached.
        assert!(spec.has_sync());
        assert_eq!(component.style.get("position"), Some("absolute"));
    }

    #[test]
    fn test_enforcement_is_idempotent() {
        let mut component = ComponentInstance::new("section");
        enforce_placement(&mut component, None);
        let first = placement_spec(&component).enabled_handles();

        enforce_placement(&mut component, None);
        let second = placement_spec(&component).enabled_handles();

        assert_eq!(first, second);
        assert_eq!(component.capabilities.draggable, Some(true));
    }

    #[test]
    fn test_complete_type_contract_is_noop() {
        let defaults = ComponentTypeDefaults::new("widget")
            .with_capabilities(Capabilities::with_handles(ResizeSpec::horizontal()));

        let mut component = ComponentInstance::new("widget-block");
        component.component_type = Some("widget".to_string());
        component.style.set("position", "absolute");

        enforce_placement(&mut component, Some(&defaults));

        // The type's partial handle set is preserved untouched.
        match component.capabilities.resizable.as_ref().unwrap() {
            Resizable::Handles(spec) => assert_eq!(spec.enabled_handles(), vec!["cl", "cr"]),
            Resizable::All => panic!("type contract should be preserved"),
        }
    }

    #[test]
    fn test_complete_blanket_type_still_syncs_geometry() {
        let defaults = ComponentTypeDefaults::new("gallery")
            .with_capabilities(Capabilities::draggable_resizable());

        let mut component = ComponentInstance::new("gallery-block");
        component.component_type = Some("gallery".to_string());
        component.style.set("position", "absolute");

        enforce_placement(&mut component, Some(&defaults));

        // Blanket resizable from a complete type still ends up a synced
        // handle spec, so gestures write geometry back.
        let spec = placement_spec(&component);
        assert!(spec.has_sync());

        apply_geometry(&mut component, &Geometry::from_values(10.0, 20.0, 100.0, 50.0));
        assert_eq!(component.style.get("left"), Some("10px"));
        assert_eq!(component.style.get("top"), Some("20px"));
        assert_eq!(component.style.get("height"), Some("50px"));
    }

    #[test]
    fn test_blanket_resizable_normalized_with_sync() {
        let mut component = ComponentInstance::new("section");
        component.capabilities = Capabilities::draggable_resizable();
        enforce_placement(&mut component, None);

        let spec = placement_spec(&component);
        assert_eq!(spec.enabled_handles().len(), 8);
        assert!(spec.has_sync());
    }

    #[test]
    fn test_type_defaults_supply_traits() {
        let defaults = ComponentTypeDefaults::new("product-grid")
            .with_capabilities(Capabilities::draggable_resizable())
            .with_trait(TraitDef::text("api-url", "API URL"));

        let mut component = ComponentInstance::new("product-grid");
        component.component_type = Some("product-grid".to_string());
        enforce_placement(&mut component, Some(&defaults));

        assert_eq!(component.trait_value("api-url"), Some(""));
        assert_eq!(component.style.get("position"), Some("absolute"));
    }

    #[test]
    fn test_enforce_on_create_resolves_registry_types() {
        let registry = BlockRegistry::new();
        register_stock_blocks(&registry).unwrap();

        let definition = registry.get("product-grid").unwrap();
        let mut component = ComponentInstance::from_definition(&definition);
        enforce_on_create(&mut component, &registry);

        assert_eq!(component.capabilities.draggable, Some(true));
        assert!(component.traits.iter().any(|t| t.name == "api-url"));
        assert_eq!(component.style.get("position"), Some("absolute"));
    }

    #[test]
    fn test_geometry_sync_roundtrip() {
        let mut component = ComponentInstance::new("section");
        enforce_placement(&mut component, None);

        apply_geometry(&mut component, &Geometry::from_values(40.0, 8.0, 320.0, 120.0));

        assert_eq!(component.style.get("left"), Some("40px"));
        assert_eq!(component.style.get("top"), Some("8px"));
        assert_eq!(component.style.get("width"), Some("320px"));
        assert_eq!(component.style.get("height"), Some("120px"));
        // Enforcement already pinned the position mode.
        assert_eq!(component.style.get("position"), Some("absolute"));
    }
}
