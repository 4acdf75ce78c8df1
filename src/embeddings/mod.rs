//! Embeddings generation module
//!
//! Thin HTTP clients for turning text into fixed-length vectors:
//! - OpenAI-compatible endpoints (text-embedding-3-small, etc.)
//! - Ollama local models (all-minilm and friends)
//!
//! The embedding is deterministic for a given model version and input text.

pub mod client;
pub mod service;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use service::EmbeddingService;

/// Default embedding dimension (all-MiniLM-L6-v2 family)
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

use crate::errors::Result;

/// Text-to-vector seam; the retriever is generic over this so tests can
/// substitute a local implementation.
pub trait TextEmbedder {
    /// Turn text into a fixed-length vector
    fn embed(&self, text: &str) -> impl std::future::Future<Output = Result<Vec<f32>>> + Send;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        // An explicit API key means an OpenAI-compatible endpoint; otherwise
        // assume a local Ollama instance.
        let provider = if config.embeddings.api_key.is_some() {
            EmbeddingProvider::OpenAI
        } else {
            EmbeddingProvider::Ollama
        };

        Self {
            provider,
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            endpoint: config.embedding_endpoint().to_string(),
            api_key: config.embeddings.api_key.clone(),
        }
    }
}
