//! Core data types for the recommendation pipeline

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Metadata record attached to every catalog item.
///
/// Fields mirror the catalog's attribute keys. Absent values stay `None` in
/// memory and render as explicit placeholders wherever they reach a prompt,
/// so prompt text is never malformed by a missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub product_display_name: Option<String>,
    pub master_category: Option<String>,
    pub sub_category: Option<String>,
    pub article_type: Option<String>,
    pub gender: Option<String>,
    pub base_colour: Option<String>,
    pub season: Option<String>,
    pub usage: Option<String>,
    pub year: Option<String>,
}

impl ItemMetadata {
    /// Display name, or the literal placeholder when absent
    pub fn display_name(&self) -> &str {
        self.product_display_name.as_deref().unwrap_or("N/A")
    }

    /// Rich text representation used for embedding at ingestion time
    pub fn text_representation(&self) -> String {
        format!(
            "Product: {}\nCategory: {} - {} - {}\nStyle: {} {} wear in {} for {}\nYear: {}",
            or_na(&self.product_display_name),
            or_na(&self.master_category),
            or_na(&self.sub_category),
            or_na(&self.article_type),
            or_na(&self.gender),
            or_na(&self.usage),
            or_na(&self.base_colour),
            or_na(&self.season),
            or_na(&self.year),
        )
    }

    /// Convert to a JSON object for API responses and index upserts
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Render an optional field, falling back to the `N/A` placeholder
pub fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("N/A")
}

/// One item as stored in the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub embedding: Vec<f32>,
    pub metadata: ItemMetadata,
}

/// One ranked hit from the retriever.
///
/// Order among results follows the index's ranking (descending similarity);
/// scores are not guaranteed to be normalized to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub metadata: ItemMetadata,
    pub score: f32,
}

/// Inbound recommendation request
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub query: String,
}

/// One product cited in the recommendation text.
///
/// `url` is `None` when the external lookup could not resolve a link;
/// `category` is the `" - "` placeholder and `metadata` an empty object when
/// the cited name did not match any retrieved item.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInfo {
    pub name: String,
    pub url: Option<String>,
    pub category: String,
    pub metadata: Map<String, Value>,
}

/// Final response: the model's prose (product names still bracketed) plus the
/// resolved products in mention order
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendation_text: String,
    pub products: Vec<ProductInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_representation_fills_placeholders() {
        let metadata = ItemMetadata {
            product_display_name: Some("Blue Kurta".to_string()),
            master_category: Some("Apparel".to_string()),
            ..Default::default()
        };
        let text = metadata.text_representation();
        assert!(text.contains("Product: Blue Kurta"));
        assert!(text.contains("Category: Apparel - N/A - N/A"));
    }

    #[test]
    fn test_to_map_uses_catalog_keys() {
        let metadata = ItemMetadata {
            product_display_name: Some("Blue Kurta".to_string()),
            base_colour: Some("Blue".to_string()),
            ..Default::default()
        };
        let map = metadata.to_map();
        assert_eq!(map["productDisplayName"], "Blue Kurta");
        assert_eq!(map["baseColour"], "Blue");
    }
}
