//! CSV ingestion into the vector index

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing::warn;

use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::errors::StyleRagError;
use crate::index::VectorIndexClient;
use crate::models::CatalogItem;
use crate::models::ItemMetadata;

/// Number of items embedded and upserted per batch
const BATCH_SIZE: usize = 100;

/// Concurrent embedding requests per batch
const EMBED_CONCURRENCY: usize = 8;

/// Expected catalog CSV header
const HEADER: &str =
    "id,gender,masterCategory,subCategory,articleType,baseColour,season,year,usage,productDisplayName";

/// Parse one catalog CSV line into an id and cleaned metadata.
///
/// The display name is the last column and may itself contain commas, so the
/// line splits into at most ten fields. Rows with fewer columns are skipped
/// by the caller. Missing attribute values get the dataset's conventional
/// defaults instead of staying absent.
pub fn parse_catalog_line(line: &str) -> Option<(String, ItemMetadata)> {
    let fields: Vec<&str> = line.splitn(10, ',').collect();
    if fields.len() < 10 {
        return None;
    }

    let id = fields[0].trim();
    if id.is_empty() {
        return None;
    }

    let cleaned = |value: &str, default: &str| {
        let value = value.trim();
        if value.is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    };

    let metadata = ItemMetadata {
        gender: Some(cleaned(fields[1], "Unisex")),
        master_category: Some(cleaned(fields[2], "Apparel")),
        sub_category: Some(cleaned(fields[3], "Topwear")),
        article_type: Some(cleaned(fields[4], "Tshirts")),
        base_colour: Some(cleaned(fields[5], "Not Specified")),
        season: Some(cleaned(fields[6], "All Season")),
        year: Some(cleaned(fields[7], "2012")),
        usage: Some(cleaned(fields[8], "Casual")),
        product_display_name: Some(cleaned(fields[9], "Unknown Product")),
    };

    Some((id.to_string(), metadata))
}

/// Ingests catalog rows: embed text representations, upsert in batches
pub struct CatalogIngestor {
    embedding_service: Arc<EmbeddingService>,
    index: Arc<VectorIndexClient>,
}

impl CatalogIngestor {
    pub fn new(embedding_service: Arc<EmbeddingService>, index: Arc<VectorIndexClient>) -> Self {
        Self {
            embedding_service,
            index,
        }
    }

    /// Ingest a catalog CSV file. Returns the number of items upserted.
    pub async fn ingest_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let content = std::fs::read_to_string(&path)?;
        let mut lines = content.lines();

        match lines.next() {
            Some(header) if header.trim() == HEADER => {}
            Some(header) => {
                return Err(StyleRagError::Validation(format!(
                    "Unexpected catalog header: {header}"
                )));
            }
            None => {
                return Err(StyleRagError::Validation("Empty catalog file".to_string()));
            }
        }

        let mut batch: Vec<(String, ItemMetadata)> = Vec::with_capacity(BATCH_SIZE);
        let mut total = 0usize;
        let mut skipped = 0usize;

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let Some(row) = parse_catalog_line(line) else {
                skipped += 1;
                continue;
            };
            batch.push(row);

            if batch.len() == BATCH_SIZE {
                total += self.embed_and_upsert(std::mem::take(&mut batch)).await?;
                info!("Upserted batch, {} items so far", total);
            }
        }

        if !batch.is_empty() {
            total += self.embed_and_upsert(batch).await?;
        }

        if skipped > 0 {
            warn!("Skipped {} malformed catalog rows", skipped);
        }
        info!("Ingestion complete: {} items", total);

        Ok(total)
    }

    /// Embed one batch of rows concurrently and upsert the resulting vectors
    async fn embed_and_upsert(&self, rows: Vec<(String, ItemMetadata)>) -> Result<usize> {
        use futures::stream::StreamExt;
        use futures::stream::{
            self,
        };

        let embeddings: Vec<Result<Vec<f32>>> = stream::iter(rows.iter())
            .map(|(_, metadata)| {
                let text = metadata.text_representation();
                async move { self.embedding_service.generate(&text).await }
            })
            .buffered(EMBED_CONCURRENCY)
            .collect()
            .await;

        let mut items = Vec::with_capacity(rows.len());
        for ((id, metadata), embedding) in rows.into_iter().zip(embeddings) {
            items.push(CatalogItem {
                id,
                embedding: embedding?,
                metadata,
            });
        }

        self.index.upsert(&items).await?;
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_line_keeps_commas_in_display_name() {
        let line = "15970,Men,Apparel,Topwear,Shirts,Navy Blue,Fall,2011,Casual,Turtle Check Men, Navy Blue Shirt";
        let (id, metadata) = parse_catalog_line(line).unwrap();
        assert_eq!(id, "15970");
        assert_eq!(
            metadata.product_display_name.as_deref(),
            Some("Turtle Check Men, Navy Blue Shirt")
        );
        assert_eq!(metadata.base_colour.as_deref(), Some("Navy Blue"));
    }

    #[test]
    fn test_parse_catalog_line_fills_dataset_defaults() {
        let line = "100,Women,Apparel,Topwear,Kurtas,,,2012,,Global Desi Kurta";
        let (_, metadata) = parse_catalog_line(line).unwrap();
        assert_eq!(metadata.base_colour.as_deref(), Some("Not Specified"));
        assert_eq!(metadata.season.as_deref(), Some("All Season"));
        assert_eq!(metadata.usage.as_deref(), Some("Casual"));
    }

    #[test]
    fn test_parse_catalog_line_rejects_short_rows() {
        assert!(parse_catalog_line("1,Men,Apparel").is_none());
        assert!(parse_catalog_line("").is_none());
    }
}
