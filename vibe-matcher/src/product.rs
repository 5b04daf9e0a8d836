//! Product records
//!
//! Raw catalog input and the embedded product it becomes.

use serde::{Deserialize, Serialize};

/// Catalog input record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProduct {
    pub name: String,
    pub description: String,
}

impl RawProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Product with its description embedding
///
/// Built once by [`crate::catalog::build_catalog`]; read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    name: String,
    description: String,
    #[serde(skip)]
    embedding: Vec<f32>,
}

impl Product {
    pub(crate) fn new(raw: RawProduct, embedding: Vec<f32>) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            embedding,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_product_deserialize() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"name": "Denim Jacket", "description": "Faded blue"}"#)
                .unwrap();
        assert_eq!(raw, RawProduct::new("Denim Jacket", "Faded blue"));
    }

    #[test]
    fn test_product_serialization_skips_embedding() {
        let product = Product::new(RawProduct::new("Tote", "Canvas bag"), vec![0.1, 0.2]);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["name"], "Tote");
        assert!(json.get("embedding").is_none());
        assert_eq!(product.embedding(), &[0.1, 0.2]);
    }
}
