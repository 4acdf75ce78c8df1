//! Outfit recommendation generation and structured output extraction

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::errors::StyleRagError;
use crate::llm::prompts;
use crate::llm::prompts::RESPONSE_CLOSE_MARKER;
use crate::llm::prompts::RESPONSE_OPEN_MARKER;
use crate::llm::TextGenerator;

/// Generates the outfit recommendation and extracts the user-facing portion
/// of the model's output.
pub struct RecommendationGenerator<G> {
    llm: Arc<G>,
    temperature: f32,
    max_tokens: usize,
}

impl<G: TextGenerator> RecommendationGenerator<G> {
    pub fn new(llm: Arc<G>, temperature: f32, max_tokens: usize) -> Self {
        Self {
            llm,
            temperature,
            max_tokens,
        }
    }

    /// Generate a recommendation for the user query given formatted results.
    ///
    /// The prompt requires the model to wrap its reasoning in analysis
    /// markers and the final answer in response markers; only the response
    /// content is returned, the analysis is discarded.
    pub async fn generate(&self, user_query: &str, formatted_results: &str) -> Result<String> {
        let prompt = prompts::recommendation_prompt(user_query, formatted_results);
        let raw = self
            .llm
            .generate(&prompt, self.temperature, self.max_tokens)
            .await?;

        debug!("Model output: {} chars", raw.len());
        extract_response(&raw)
    }
}

/// Extract the content of the first response-marker pair.
///
/// Takes the earliest closing marker after the first opening marker (the
/// non-greedy match); if the model emits multiple pairs only the first is
/// used. Missing markers are a hard failure, not recoverable without a retry
/// by the caller.
pub fn extract_response(raw: &str) -> Result<String> {
    let start = raw.find(RESPONSE_OPEN_MARKER).ok_or_else(|| {
        StyleRagError::MalformedOutput(format!(
            "No content found between {RESPONSE_OPEN_MARKER} tags"
        ))
    })?;
    let content_start = start + RESPONSE_OPEN_MARKER.len();
    let end = raw[content_start..]
        .find(RESPONSE_CLOSE_MARKER)
        .ok_or_else(|| {
            StyleRagError::MalformedOutput(format!(
                "No content found between {RESPONSE_OPEN_MARKER} tags"
            ))
        })?;

    Ok(raw[content_start..content_start + end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_response_trims_content() {
        let raw = "<outfit_analysis>reasoning</outfit_analysis>\n<response>\nHi there!\n</response>";
        assert_eq!(extract_response(raw).unwrap(), "Hi there!");
    }

    #[test]
    fn test_missing_markers_is_hard_failure() {
        let raw = "Here is my recommendation without any markers.";
        let err = extract_response(raw).unwrap_err();
        assert!(matches!(err, StyleRagError::MalformedOutput(_)));
    }

    #[test]
    fn test_open_without_close_is_hard_failure() {
        let raw = "<response>never closed";
        assert!(matches!(
            extract_response(raw),
            Err(StyleRagError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_first_pair_wins() {
        let raw = "<response>first</response> noise <response>second</response>";
        assert_eq!(extract_response(raw).unwrap(), "first");
    }

    #[test]
    fn test_earliest_close_wins() {
        // Non-greedy: stop at the first closing marker, even with another later
        let raw = "<response>short</response> tail </response>";
        assert_eq!(extract_response(raw).unwrap(), "short");
    }
}
