//! Language model module
//!
//! `LlmService` is a thin text-in/text-out client over OpenAI-compatible chat
//! endpoints or a local Ollama instance. Temperature and token limits are per
//! call: the pipeline rewrites queries at temperature 0 and generates
//! recommendations at a creative temperature.

pub mod prompts;
pub mod service;

pub use service::LlmProvider;
pub use service::LlmService;

use crate::errors::Result;

/// Text-in/text-out generation seam; pipeline components are generic over
/// this so tests can substitute a local implementation.
pub trait TextGenerator {
    /// Generate text from a prompt at the given temperature and token limit
    fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
