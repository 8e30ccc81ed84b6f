//! Stock block catalog
//!
//! The block set offered out of the box: basic page sections, navigation,
//! the form element family, layout helpers, and the two data-bound
//! e-commerce shells. One builder function per block, one aggregator that
//! wires the whole catalog into a registry.

use crate::definition::{
    BlockContent, BlockDefinition, Capabilities, ComponentTypeDefaults, Resizable, ResizeSpec,
    TraitDef,
};
use crate::registry::{BlockRegistry, RegistryError};

/// Component type name used by the structured product grid block
pub const PRODUCT_GRID_TYPE: &str = "product-grid";

/// Component type name for text elements with horizontal-only resizing
pub const RESIZABLE_TEXT_TYPE: &str = "resizable-text";

/// Register every stock block, the form category, and the component-type
/// defaults into the given registry.
pub fn register_stock_blocks(registry: &BlockRegistry) -> Result<(), RegistryError> {
    // The forms category carries a display label, so it is pre-registered
    // rather than created implicitly.
    registry.add_category("Forms", "Form Elements");

    for definition in stock_definitions() {
        registry.register(definition)?;
    }
    for defaults in stock_component_types() {
        registry.register_component_type(defaults);
    }
    Ok(())
}

/// All stock definitions in panel order
pub fn stock_definitions() -> Vec<BlockDefinition> {
    vec![
        section_block(),
        text_block(),
        header_block(),
        footer_block(),
        testimonial_block(),
        navbar_block(),
        button_block(),
        image_block(),
        columns_block(),
        form_block(),
        form_group_block(),
        text_input_block(),
        email_input_block(),
        password_input_block(),
        text_area_block(),
        checkbox_block(),
        radio_block(),
        submit_button_block(),
        product_summary_block(),
        product_grid_block(),
    ]
}

/// Component-type defaults referenced by stock blocks
pub fn stock_component_types() -> Vec<ComponentTypeDefaults> {
    vec![
        ComponentTypeDefaults::new(RESIZABLE_TEXT_TYPE)
            .with_capabilities(Capabilities {
                draggable: None,
                resizable: Some(Resizable::Handles(ResizeSpec::horizontal())),
            })
            .with_trait(TraitDef::number("font-size", "Font Size")),
        ComponentTypeDefaults::new(PRODUCT_GRID_TYPE)
            .with_capabilities(Capabilities::draggable_resizable())
            .with_trait(TraitDef::text("api-url", "API URL")),
    ]
}

// ============================================================================
// Basic blocks
// ============================================================================

fn section_block() -> BlockDefinition {
    BlockDefinition::new(
        "section",
        "Section",
        BlockContent::markup(
            r#"<section class="py-10 px-6 bg-gray-100 text-center rounded-lg shadow-lg">
    <h2 class="text-3xl font-semibold text-gray-800">Modern Section</h2>
    <p class="text-gray-600 mt-2">Add your content here.</p>
</section>"#,
        ),
        "Basic",
    )
    .with_icon("fa fa-th-large")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn text_block() -> BlockDefinition {
    BlockDefinition::new(
        "text",
        "Text",
        BlockContent::markup(r#"<p class="text-lg text-gray-700">Your customizable text here...</p>"#),
        "Basic",
    )
    .with_icon("fa fa-font")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn header_block() -> BlockDefinition {
    BlockDefinition::new(
        "header",
        "Header",
        BlockContent::markup(
            r#"<header class="bg-gradient-to-r from-green-400 to-blue-500 text-white text-center py-8">
    <h1 data-component-type="resizable-text" class="text-4xl font-bold">Welcome to My Website</h1>
    <p data-component-type="resizable-text" class="text-lg mt-2">A simple tagline to catch attention.</p>
</header>"#,
        ),
        "Basic",
    )
    .with_icon("fa fa-header")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn footer_block() -> BlockDefinition {
    BlockDefinition::new(
        "footer",
        "Footer",
        BlockContent::markup(
            r##"<footer class="bg-gray-800 text-white text-center py-6">
    <p class="text-sm">© 2024 Your Company. All rights reserved.</p>
    <nav>
        <a href="#" class="text-white hover:underline mx-4">Privacy</a>
        <a href="#" class="text-white hover:underline mx-4">Terms</a>
        <a href="#" class="text-white hover:underline mx-4">Contact</a>
    </nav>
</footer>"##,
        ),
        "Basic",
    )
    .with_icon("fa fa-align-center")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn testimonial_block() -> BlockDefinition {
    BlockDefinition::new(
        "testimonial",
        "Testimonial",
        BlockContent::markup(
            r#"<div class="bg-white p-6 shadow-lg rounded-lg text-center max-w-lg mx-auto">
    <p class="italic text-gray-700">"This product changed my life! Highly recommended!"</p>
    <p class="mt-4 text-gray-900 font-bold">John Doe, CEO of Company</p>
</div>"#,
        ),
        "Basic",
    )
    .with_icon("fa fa-quote-right")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn navbar_block() -> BlockDefinition {
    BlockDefinition::new(
        "navbar",
        "Navbar",
        BlockContent::markup(
            r##"<nav class="bg-white shadow-lg p-4">
    <div class="flex justify-between items-center">
        <a href="#" class="text-xl font-bold text-gray-800">MyLogo</a>
        <div class="hidden md:flex space-x-4">
            <a href="#" class="text-gray-600 hover:text-blue-600">Home</a>
            <a href="#" class="text-gray-600 hover:text-blue-600">About</a>
            <a href="#" class="text-gray-600 hover:text-blue-600">Services</a>
            <a href="#" class="text-gray-600 hover:text-blue-600">Contact</a>
        </div>
    </div>
</nav>"##,
        ),
        "Basic",
    )
    .with_icon("fa fa-bars")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn button_block() -> BlockDefinition {
    BlockDefinition::new(
        "button",
        "Button",
        BlockContent::markup(
            r#"<button class="bg-gradient-to-r from-blue-400 to-purple-600 text-white py-2 px-4 rounded-full hover:opacity-90">Click Me</button>"#,
        ),
        "Basic",
    )
    .with_icon("fa fa-hand-pointer")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn image_block() -> BlockDefinition {
    BlockDefinition::new(
        "image",
        "Image",
        BlockContent::Component {
            component_type: "image".to_string(),
            attributes: vec![
                (
                    "src".to_string(),
                    "https://via.placeholder.com/150".to_string(),
                ),
                ("class".to_string(), "custom-image".to_string()),
            ],
            active_on_render: true,
            shell: None,
        },
        "Basic",
    )
    .with_icon("fa fa-image")
    .with_capabilities(Capabilities::with_handles(ResizeSpec::all_handles()))
}

fn columns_block() -> BlockDefinition {
    BlockDefinition::new(
        "columns",
        "Columns",
        BlockContent::markup(
            r#"<div class="grid grid-cols-3 gap-4 p-4 bg-white shadow-md rounded-lg">
    <div class="col-span-1 bg-gray-50 p-4 rounded-md">Column 1</div>
    <div class="col-span-1 bg-gray-50 p-4 rounded-md">Column 2</div>
    <div class="col-span-1 bg-gray-50 p-4 rounded-md">Column 3</div>
</div>"#,
        ),
        "Layout",
    )
    .with_icon("fa fa-columns")
    .with_capabilities(Capabilities::draggable_resizable())
}

// ============================================================================
// Form blocks
// ============================================================================

fn form_block() -> BlockDefinition {
    BlockDefinition::new(
        "form",
        "Form",
        BlockContent::markup(
            r#"<form class="bg-white p-6 rounded-lg shadow-lg">
    <div class="mb-4">
        <label class="block text-gray-600 mb-2" for="name">Name:</label>
        <input type="text" id="name" class="form-input bg-gray-50 rounded-md px-4 py-2 border border-gray-300" placeholder="Enter your name">
    </div>
    <div class="mb-4">
        <label class="block text-gray-600 mb-2" for="email">Email:</label>
        <input type="email" id="email" class="form-input bg-gray-50 rounded-md px-4 py-2 border border-gray-300" placeholder="Enter your email">
    </div>
    <button class="bg-blue-500 text-white py-2 px-4 rounded-lg hover:bg-blue-600">Submit</button>
</form>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-envelope")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn form_group_block() -> BlockDefinition {
    BlockDefinition::new(
        "form-group",
        "Form Group",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="block text-gray-700 text-sm font-bold mb-2">Label:</label>
    <input type="text" class="form-input bg-gray-50 rounded-md px-4 py-2 border border-gray-300" placeholder="Enter text">
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-list-alt")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn text_input_block() -> BlockDefinition {
    BlockDefinition::new(
        "text-input",
        "Text Input",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="block text-gray-700 text-sm font-bold mb-2">Text Input:</label>
    <input type="text" class="form-input bg-gray-50 rounded-md px-4 py-2 border border-gray-300" placeholder="Enter text">
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-i-cursor")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn email_input_block() -> BlockDefinition {
    BlockDefinition::new(
        "email-input",
        "Email Input",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="block text-gray-700 text-sm font-bold mb-2">Email Address:</label>
    <input type="email" class="form-input bg-gray-50 rounded-md px-4 py-2 border border-gray-300" placeholder="Enter your email">
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-envelope")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn password_input_block() -> BlockDefinition {
    BlockDefinition::new(
        "password-input",
        "Password Input",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="block text-gray-700 text-sm font-bold mb-2">Password:</label>
    <input type="password" class="form-input bg-gray-50 rounded-md px-4 py-2 border border-gray-300" placeholder="Enter your password">
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-key")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn text_area_block() -> BlockDefinition {
    BlockDefinition::new(
        "text-area",
        "Text Area",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="block text-gray-700 text-sm font-bold mb-2">Text Area:</label>
    <textarea class="form-textarea bg-gray-50 rounded-md px-4 py-2 border border-gray-300" rows="4" placeholder="Enter text"></textarea>
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-paragraph")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn checkbox_block() -> BlockDefinition {
    BlockDefinition::new(
        "checkbox",
        "Checkbox",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="inline-flex items-center">
        <input type="checkbox" class="form-checkbox text-blue-500">
        <span class="ml-2">Agree to terms and conditions</span>
    </label>
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-check-square")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn radio_block() -> BlockDefinition {
    BlockDefinition::new(
        "radio",
        "Radio Button",
        BlockContent::markup(
            r#"<div class="mb-4">
    <label class="inline-flex items-center">
        <input type="radio" name="option" class="form-radio text-blue-500">
        <span class="ml-2">Option 1</span>
    </label>
    <label class="inline-flex items-center ml-4">
        <input type="radio" name="option" class="form-radio text-blue-500">
        <span class="ml-2">Option 2</span>
    </label>
</div>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-dot-circle")
    .with_capabilities(Capabilities::draggable_resizable())
}

fn submit_button_block() -> BlockDefinition {
    BlockDefinition::new(
        "submit-button",
        "Submit Button",
        BlockContent::markup(
            r#"<button type="submit" class="bg-blue-500 text-white py-2 px-4 rounded-md hover:bg-blue-600">Submit</button>"#,
        ),
        "Forms",
    )
    .with_icon("fa fa-paper-plane")
    .with_capabilities(Capabilities::draggable_resizable())
}

// ============================================================================
// E-commerce blocks (data-bound shells)
// ============================================================================

/// Templated flavor: the engine substitutes the title and item tokens on
/// each successful fetch.
fn product_summary_block() -> BlockDefinition {
    BlockDefinition::new(
        "product-summary",
        "Product List",
        BlockContent::markup(
            r#"<div class="api-block">
    <h3>{{ title }}</h3>
    <ul>
        {{ #each items }}
        {{ this }}
        {{ /each }}
    </ul>
</div>"#,
        ),
        "E-commerce",
    )
    .with_icon("fa fa-list")
    .with_capabilities(Capabilities::draggable_resizable())
    .with_style(
        ".api-block { padding: 10px; border: 1px solid #ddd; border-radius: 4px; }",
    )
}

/// Structured flavor: a container whose descendants are regenerated per
/// fetched record, plus a manual refresh control.
fn product_grid_block() -> BlockDefinition {
    BlockDefinition::new(
        "product-grid",
        "API Product List",
        BlockContent::Component {
            component_type: PRODUCT_GRID_TYPE.to_string(),
            attributes: vec![("class".to_string(), "product-list".to_string())],
            active_on_render: false,
            // The shell renders before the first fetch resolves; the engine
            // regenerates only the grid container's children.
            shell: Some(
                r#"<div class="product-list">
    <h2 class="product-list-title">Our Products</h2>
    <button class="refresh-button">Refresh Products</button>
    <div class="product-grid"></div>
</div>"#
                    .to_string(),
            ),
        },
        "E-commerce",
    )
    .with_icon("fa fa-shopping-bag")
    .with_capabilities(Capabilities::draggable_resizable())
    .with_style(
        r#".product-list { padding: 20px; }
.product-list-title { text-align: center; margin-bottom: 20px; }
.refresh-button { display: block; margin-bottom: 20px; padding: 10px 20px; }
.product-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 20px; }
.product-item { border: 1px solid #ddd; padding: 10px; text-align: center; }
.product-image { max-width: 100%; height: auto; }
.product-name { margin: 10px 0; }
.product-description { font-size: 0.9em; color: #666; }"#,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Resizable, TraitKind};

    #[test]
    fn test_register_stock_blocks() {
        let registry = BlockRegistry::new();
        register_stock_blocks(&registry).unwrap();

        assert_eq!(registry.count(), stock_definitions().len());
        assert!(registry.contains("section"));
        assert!(registry.contains("product-grid"));
    }

    #[test]
    fn test_category_grouping() {
        let registry = BlockRegistry::new();
        register_stock_blocks(&registry).unwrap();

        let groups = registry.list_by_category();
        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        // Forms is pre-registered first, before any implicit category.
        assert_eq!(ids, vec!["Forms", "Basic", "Layout", "E-commerce"]);

        let forms = &groups[0];
        assert_eq!(forms.label, "Form Elements");
        assert_eq!(forms.blocks.len(), 9);
    }

    #[test]
    fn test_every_stock_block_declares_placement() {
        for def in stock_definitions() {
            assert!(
                def.capabilities.is_complete(),
                "stock block '{}' must declare draggable and resizable",
                def.id
            );
        }
    }

    #[test]
    fn test_image_block_is_structured() {
        let def = image_block();
        match &def.content {
            BlockContent::Component {
                component_type,
                attributes,
                active_on_render,
                shell,
            } => {
                assert_eq!(component_type, "image");
                assert!(*active_on_render);
                assert!(attributes.iter().any(|(k, _)| k == "src"));
                assert!(shell.is_none());
            }
            BlockContent::Markup(_) => panic!("image block should be a structured descriptor"),
        }
    }

    #[test]
    fn test_templated_shell_carries_tokens() {
        let def = product_summary_block();
        let BlockContent::Markup(template) = &def.content else {
            panic!("product summary should be a markup template");
        };
        assert!(template.contains("{{ title }}"));
        assert!(template.contains("{{ #each items }}"));
        assert!(template.contains("{{ this }}"));
        assert!(template.contains("{{ /each }}"));
        assert!(def.style.is_some());
    }

    #[test]
    fn test_product_grid_ships_its_shell_markup() {
        let def = product_grid_block();
        let shell = def.content.shell_markup().unwrap();

        // The shell is visible before the first fetch resolves: title,
        // manual refresh control, and the empty grid container.
        assert!(shell.contains(r#"<h2 class="product-list-title">Our Products</h2>"#));
        assert!(shell.contains(r#"<button class="refresh-button">Refresh Products</button>"#));
        assert!(shell.contains(r#"<div class="product-grid"></div>"#));
    }

    #[test]
    fn test_resizable_text_defaults_partial_handles() {
        let defaults = stock_component_types()
            .into_iter()
            .find(|d| d.component_type == RESIZABLE_TEXT_TYPE)
            .unwrap();

        let Some(Resizable::Handles(spec)) = &defaults.capabilities.resizable else {
            panic!("resizable-text must declare explicit handles");
        };
        assert_eq!(spec.enabled_handles(), vec!["cl", "cr"]);
        assert_eq!(defaults.traits[0].kind, TraitKind::Number);
        assert_eq!(defaults.traits[0].name, "font-size");
    }

    #[test]
    fn test_product_grid_type_has_api_url_trait() {
        let defaults = stock_component_types()
            .into_iter()
            .find(|d| d.component_type == PRODUCT_GRID_TYPE)
            .unwrap();
        assert!(defaults.traits.iter().any(|t| t.name == "api-url"));
    }
}
