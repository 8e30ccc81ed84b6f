//! Structured data-bound flavor
//!
//! The structured block expects the endpoint to answer with an array of
//! product records. On every successful fetch the container's children
//! are regenerated from scratch: one fragment per record with the image,
//! name and description slotted in. Record ids may be numbers or strings;
//! they are carried through verbatim as a `data-product-id` attribute.

use crate::databound::BlockRenderer;
use serde::Deserialize;
use serde_json::Value;

/// One product row as served by the data endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    /// Endpoint-assigned id, number or string
    pub id: Value,
    pub image: String,
    pub name: String,
    pub description: String,
}

impl ProductRecord {
    fn id_text(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Renders an array of [`ProductRecord`]s into product-item fragments
#[derive(Debug, Clone, Default)]
pub struct StructuredRenderer;

impl StructuredRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl BlockRenderer for StructuredRenderer {
    fn render(&self, payload: &Value) -> Result<String, String> {
        let records: Vec<ProductRecord> =
            serde_json::from_value(payload.clone()).map_err(|e| e.to_string())?;

        let mut out = String::new();
        for record in &records {
            out.push_str(&format!(
                concat!(
                    r#"<div class="product-item" data-product-id="{id}">"#,
                    r#"<img class="product-image" src="{image}" alt="{name}">"#,
                    r#"<h3 class="product-name">{name}</h3>"#,
                    r#"<p class="product-description">{description}</p>"#,
                    "</div>"
                ),
                id = record.id_text(),
                image = record.image,
                name = record.name,
                description = record.description,
            ));
        }
        Ok(out)
    }

    fn error_markup(&self) -> String {
        "<p>Error loading products</p>".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
