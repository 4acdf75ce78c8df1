//! Nearest-neighbor retrieval over the catalog index

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::TextEmbedder;
use crate::errors::Result;
use crate::errors::StyleRagError;
use crate::index::NearestNeighborIndex;
use crate::models::SearchResult;

/// Retriever combining the embedder and the vector index
pub struct Retriever<E, I> {
    embedding_service: Arc<E>,
    index: Arc<I>,
    over_fetch: usize,
}

impl<E: TextEmbedder, I: NearestNeighborIndex> Retriever<E, I> {
    /// Create a new retriever. `over_fetch` multiplies the requested `k` for
    /// the index-side candidate pool (a tunable, not a correctness knob).
    pub fn new(embedding_service: Arc<E>, index: Arc<I>, over_fetch: usize) -> Self {
        Self {
            embedding_service,
            index,
            over_fetch: over_fetch.max(1),
        }
    }

    /// Search the catalog for the `k` nearest items to `query_text`.
    ///
    /// Index order is preserved as-is (the index is configured for descending
    /// cosine similarity; different backends score differently, so no
    /// re-sorting happens here). An empty result is `Ok(vec![])`, not an
    /// error; callers distinguish "no results" from failure. Embedding and
    /// index failures both surface as `Retrieval`.
    pub async fn search(&self, query_text: &str, k: usize) -> Result<Vec<SearchResult>> {
        debug!("Performing semantic search: {}", query_text);

        let query_embedding = self
            .embedding_service
            .embed(query_text)
            .await
            .map_err(|e| StyleRagError::Retrieval(e.to_string()))?;

        let matches = self
            .index
            .query(&query_embedding, k * self.over_fetch, None)
            .await?;

        debug!("Found {} results from vector search", matches.len());

        let results = matches
            .into_iter()
            .take(k)
            .map(|m| SearchResult {
                metadata: m.metadata,
                score: m.score,
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::index::IndexMatch;
    use crate::models::ItemMetadata;

    struct FixedEmbedder {
        fail: bool,
    }

    impl TextEmbedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            if self.fail {
                return Err(StyleRagError::Embedding("model unavailable".to_string()));
            }
            Ok(vec![0.0; 4])
        }
    }

    struct FixedIndex {
        matches: Vec<(String, f32)>,
    }

    impl NearestNeighborIndex for FixedIndex {
        async fn query(
            &self,
            _vector: &[f32],
            top_k: usize,
            _filter: Option<Value>,
        ) -> Result<Vec<IndexMatch>> {
            Ok(self
                .matches
                .iter()
                .take(top_k)
                .map(|(name, score)| IndexMatch {
                    id: name.clone(),
                    score: *score,
                    metadata: ItemMetadata {
                        product_display_name: Some(name.clone()),
                        ..Default::default()
                    },
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_embedding_failure_surfaces_as_retrieval_error() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder { fail: true }),
            Arc::new(FixedIndex { matches: vec![] }),
            2,
        );
        let err = retriever.search("red dress", 5).await.unwrap_err();
        assert!(matches!(err, StyleRagError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_empty_index_yields_ok_empty() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder { fail: false }),
            Arc::new(FixedIndex { matches: vec![] }),
            2,
        );
        let results = retriever.search("red dress", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_over_fetch_truncates_back_to_k() {
        let matches = (0..10)
            .map(|i| (format!("Item {i}"), 1.0 - i as f32 * 0.05))
            .collect();
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder { fail: false }),
            Arc::new(FixedIndex { matches }),
            2,
        );
        let results = retriever.search("red dress", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].metadata.product_display_name.as_deref(),
            Some("Item 0")
        );
    }
}
