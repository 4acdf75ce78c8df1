//! Taxonomy-constrained query rewriting

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::llm::prompts;
use crate::llm::TextGenerator;
use crate::taxonomy::Taxonomy;

/// Rewrites free-text queries into attribute-rich descriptions using exact
/// taxonomy terms, so the embedding lands near well-described catalog items.
pub struct QueryRewriter<G> {
    llm: Arc<G>,
    taxonomy: Arc<Taxonomy>,
    temperature: f32,
    max_tokens: usize,
}

impl<G: TextGenerator> QueryRewriter<G> {
    pub fn new(llm: Arc<G>, taxonomy: Arc<Taxonomy>, temperature: f32, max_tokens: usize) -> Self {
        Self {
            llm,
            taxonomy,
            temperature,
            max_tokens,
        }
    }

    /// Rewrite a user query into a taxonomy-aligned product description.
    ///
    /// Temperature 0 by configuration: rewriting should be as deterministic
    /// as the model allows. No retries here; that is the caller's policy.
    pub async fn rewrite(&self, query: &str) -> Result<String> {
        let prompt = prompts::rewrite_prompt(&self.taxonomy, query);
        let rewritten = self
            .llm
            .generate(&prompt, self.temperature, self.max_tokens)
            .await?;
        let rewritten = rewritten.trim().to_string();

        debug!("Rewrote query \"{}\" -> \"{}\"", query, rewritten);
        Ok(rewritten)
    }
}
