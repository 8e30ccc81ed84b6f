//! Templated data-bound flavor
//!
//! Renders a markup template by substituting tokens from a
//! `{ "title": string, "items": [string] }` payload:
//!
//! - `{{ title }}` — replaced with the payload title
//! - `{{ #each items }} ... {{ /each }}` — the enclosed fragment is
//!   repeated once per item, with `{{ this }}` replaced by the item,
//!   each wrapped in a list element
//!
//! The template itself lives in the block definition; the renderer never
//! mutates it, so re-renders always start from the original tokens.

use crate::databound::BlockRenderer;
use serde::Deserialize;
use serde_json::Value;

const TITLE_TOKEN: &str = "{{ title }}";
const ITEM_TOKEN: &str = "{{ this }}";
const EACH_OPEN: &str = "{{ #each items }}";
const EACH_CLOSE: &str = "{{ /each }}";

#[derive(Debug, Deserialize)]
struct TemplatedPayload {
    title: String,
    items: Vec<String>,
}

/// Token-substituting renderer for templated blocks
#[derive(Debug, Clone)]
pub struct TemplatedRenderer {
    template: String,
}

impl TemplatedRenderer {
    /// Create a renderer over a markup template
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The template this renderer substitutes into
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl BlockRenderer for TemplatedRenderer {
    fn render(&self, payload: &Value) -> Result<String, String> {
        let payload: TemplatedPayload =
            serde_json::from_value(payload.clone()).map_err(|e| e.to_string())?;

        let mut out = self.template.replace(TITLE_TOKEN, &payload.title);

        while let Some(start) = out.find(EACH_OPEN) {
            let inner_start = start + EACH_OPEN.len();
            let rel_close = out[inner_start..]
                .find(EACH_CLOSE)
                .ok_or_else(|| format!("unterminated '{EACH_OPEN}' section in template"))?;
            let inner_end = inner_start + rel_close;
            let fragment = out[inner_start..inner_end].to_string();

            let expanded: String = payload
                .items
                .iter()
                .map(|item| {
                    let body = fragment.replace(ITEM_TOKEN, item);
                    format!("<li>{}</li>", body.trim())
                })
                .collect();

            out.replace_range(start..inner_end + EACH_CLOSE.len(), &expanded);
        }

        Ok(out)
    }

    fn error_markup(&self) -> String {
        "<p>Error loading data</p>".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::databound::{DataBoundBlock, EngineConfig, RenderState};
    use crate::fetch::{DataFetcher, FetchError};
    use async_trait::async_trait;
    use pagewright_blocks::{stock_definitions, BlockContent};
    use serde_json::json;
    use std::sync::Arc;

    fn stock_template() -> String {
        let defs = stock_definitions();
        let def = defs.iter().find(|d| d.id == "product-summary").unwrap();
        match &def.content {
            BlockContent::Markup(template) => template.clone(),
            _ => panic!("product summary is a markup template"),
        }
    }

    #[test]
    fn test_substitutes_title_and_items() {
        let renderer = TemplatedRenderer::new(
            "<h3>{{ title }}</h3><ul>{{ #each items }}{{ this }}{{ /each }}</ul>",
        );
        let out = renderer
            .render(&json!({"title": "Specials", "items": ["Tea", "Coffee"]}))
            .unwrap();
        assert_eq!(out, "<h3>Specials</h3><ul><li>Tea</li><li>Coffee</li></ul>");
    }

    #[test]
    fn test_empty_items_renders_empty_list() {
        let renderer =
            TemplatedRenderer::new("<ul>{{ #each items }}{{ this }}{{ /each }}</ul>");
        let out = renderer.render(&json!({"title": "x", "items": []})).unwrap();
        assert_eq!(out, "<ul></ul>");
    }

    #[test]
    fn test_stock_template_renders() {
        let renderer = TemplatedRenderer::new(stock_template());
        let out = renderer
            .render(&json!({"title": "Our Products", "items": ["A", "B"]}))
            .unwrap();
        assert!(out.contains("<h3>Our Products</h3>"));
        assert!(out.contains("<li>A</li>"));
        assert!(out.contains("<li>B</li>"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_wrong_payload_shape_is_an_error() {
        let renderer = TemplatedRenderer::new("<h3>{{ title }}</h3>");
        assert!(renderer.render(&json!({"items": ["a"]})).is_err());
        assert!(renderer.render(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_unterminated_each_is_an_error() {
        let renderer = TemplatedRenderer::new("{{ #each items }}{{ this }}");
        let err = renderer
            .render(&json!({"title": "t", "items": ["a"]}))
            .unwrap_err();
        assert!(err.contains("unterminated"));
    }

    #[test]
    fn test_rerender_starts_from_original_template() {
        let renderer = TemplatedRenderer::new(stock_template());
        let first = renderer
            .render(&json!({"title": "First", "items": ["1"]}))
            .unwrap();
        let second = renderer
            .render(&json!({"title": "Second", "items": ["2"]}))
            .unwrap();
        assert!(first.contains("First"));
        assert!(second.contains("Second"));
        assert!(!second.contains("First"));
    }

    #[tokio::test]
    async fn test_templated_block_end_to_end() {
        struct Scripted;

        #[async_trait]
        impl DataFetcher for Scripted {
            async fn fetch_json(&self, _url: &str) -> Result<Value, FetchError> {
                Ok(json!({"title": "Menu", "items": ["Espresso", "Filter"]}))
            }
        }

        let block = DataBoundBlock::new(
            TemplatedRenderer::new(stock_template()),
            Arc::new(Scripted),
            "http://localhost:3000/api/menu",
            &EngineConfig::default(),
        );
        block.mount().await;

        assert_eq!(block.state(), RenderState::Rendered);
        let out = block.output();
        assert!(out.contains("<h3>Menu</h3>"));
        assert!(out.contains("<li>Espresso</li>"));
        block.destroy();
    }
}
