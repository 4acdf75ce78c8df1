//! Vector index module
//!
//! The catalog lives in an external nearest-neighbor store reached over HTTP.
//! The index is configured for cosine similarity and returns matches in
//! descending score order; nothing here re-ranks.

pub mod client;

pub use client::IndexMatch;
pub use client::VectorIndexClient;

use serde_json::Value;

use crate::errors::Result;

/// Nearest-neighbor query seam; the retriever is generic over this so tests
/// can substitute a local implementation.
pub trait NearestNeighborIndex {
    /// Fetch the `top_k` nearest matches to a vector, in the index's ranking order
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<Value>,
    ) -> impl std::future::Future<Output = Result<Vec<IndexMatch>>> + Send;
}
