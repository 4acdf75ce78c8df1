//! Embedding generation service

use std::sync::Arc;

use tracing::warn;

use super::client::EmbeddingClient;
use super::EmbeddingConfig;
use crate::errors::Result;

/// Service wrapping the embedding client with dimension checking
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        let embedding_config = EmbeddingConfig::from_app_config(config);
        Self::from_config(embedding_config, config.request_timeout())
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig, timeout: std::time::Duration) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
            timeout,
        )?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Generate embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.client.generate(text).await?;

        if embedding.len() != self.config.dimension {
            // The index rejects mismatched vectors; surface the mismatch here
            // where the model name is known.
            warn!(
                "Embedding dimension mismatch: model {} returned {} (expected {})",
                self.config.model,
                embedding.len(),
                self.config.dimension
            );
        }

        Ok(embedding)
    }

    /// Configured embedding dimension
    pub fn dimension(&self) -> usize {
        self.config.dimension
    }
}

impl crate::embeddings::TextEmbedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }
}
