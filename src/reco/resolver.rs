//! Product mention extraction and resolution

use std::collections::HashMap;

use tracing::debug;
use tracing::warn;

use crate::errors::Result;
use crate::lookup::ShoppingLookup;
use crate::models::ItemMetadata;
use crate::models::ProductInfo;
use crate::models::SearchResult;

/// Placeholder category for mentions with no matching catalog metadata
const EMPTY_CATEGORY: &str = " - ";

/// Resolves bracketed product mentions to catalog metadata and purchase URLs.
///
/// Generic over the lookup so tests can run without the network.
pub struct ProductResolver<L> {
    lookup: L,
}

impl<L: ShoppingLookup> ProductResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Resolve every product mentioned in the recommendation text.
    ///
    /// Mentions are processed in order of appearance, duplicates included,
    /// one external lookup call each. A metadata miss degrades to placeholder
    /// values; a failed lookup degrades to `url: None` rather than failing
    /// the whole call.
    pub async fn resolve(
        &self,
        recommendation_text: &str,
        search_results: &[SearchResult],
    ) -> Result<Vec<ProductInfo>> {
        let product_names = extract_product_names(recommendation_text);
        debug!("Extracted {} product mentions", product_names.len());

        // Last-write-wins on duplicate display names, matching insertion order
        let product_metadata: HashMap<&str, &ItemMetadata> = search_results
            .iter()
            .filter_map(|result| {
                result
                    .metadata
                    .product_display_name
                    .as_deref()
                    .map(|name| (name, &result.metadata))
            })
            .collect();

        let mut products = Vec::with_capacity(product_names.len());

        for product_name in product_names {
            let url = match self.lookup.search_product(&product_name).await {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Lookup failed for \"{}\": {}", product_name, e);
                    None
                }
            };

            let (category, metadata) = match product_metadata.get(product_name.as_str()) {
                Some(metadata) => (
                    format!(
                        "{} - {}",
                        metadata.master_category.as_deref().unwrap_or_default(),
                        metadata.sub_category.as_deref().unwrap_or_default(),
                    ),
                    metadata.to_map(),
                ),
                None => (EMPTY_CATEGORY.to_string(), serde_json::Map::new()),
            };

            products.push(ProductInfo {
                name: product_name,
                url,
                category,
                metadata,
            });
        }

        Ok(products)
    }
}

/// Extract bracketed product names in left-to-right order.
///
/// Non-greedy and non-nesting: each `[` captures up to the next `]`.
/// Duplicates are preserved.
pub fn extract_product_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        match after_open.find(']') {
            Some(close) => {
                names.push(after_open[..close].to_string());
                rest = &after_open[close + 1..];
            }
            None => break,
        }
    }

    names
}
