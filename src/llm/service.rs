//! LLM API clients

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::errors::StyleRagError;

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API
    OpenAI,
    /// Ollama local generation
    Ollama,
}

/// Client for text generation
#[derive(Clone)]
pub struct LlmService {
    provider: LlmProvider,
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

impl LlmService {
    /// Create a new LLM service from application config
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        let provider = if config.llm.api_key == "ollama" {
            LlmProvider::Ollama
        } else {
            LlmProvider::OpenAI
        };

        let client = Client::builder()
            .timeout(config.request_timeout())
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        Ok(Self {
            provider,
            model: config.llm_model().to_string(),
            endpoint: config.llm_endpoint().to_string(),
            api_key: config.llm.api_key.clone(),
            client,
        })
    }

    /// Generate text from a prompt
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Empty generations, which are never valid pipeline input
    pub async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        let text = match self.provider {
            LlmProvider::OpenAI => self.generate_openai(prompt, temperature, max_tokens).await?,
            LlmProvider::Ollama => self.generate_ollama(prompt, temperature, max_tokens).await?,
        };

        if text.trim().is_empty() {
            return Err(StyleRagError::Generation(
                "Model returned empty output".to_string(),
            ));
        }

        Ok(text)
    }

    /// Generate using an OpenAI-compatible chat completions API
    async fn generate_openai(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            max_tokens: usize,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StyleRagError::Generation(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| StyleRagError::Generation(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| StyleRagError::Generation("No choices in response".to_string()))
    }

    /// Generate using the Ollama API
    async fn generate_ollama(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct OllamaOptions {
            temperature: f32,
            num_predict: usize,
        }

        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
            options: OllamaOptions,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            response: String,
        }

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Calling Ollama generate API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StyleRagError::Generation(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| StyleRagError::Generation(format!("Failed to parse response: {e}")))?;

        Ok(result.response)
    }
}

impl crate::llm::TextGenerator for LlmService {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: usize) -> Result<String> {
        LlmService::generate(self, prompt, temperature, max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    #[ignore = "Requires a running Ollama instance"]
    async fn test_ollama_generation() {
        let config = AppConfig::default();
        let service = LlmService::new(&config).unwrap();
        let text = service.generate("Say hello.", 0.0, 64).await.unwrap();
        assert!(!text.is_empty());
    }
}
