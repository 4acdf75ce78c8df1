use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub endpoint: String,
    pub model: String,
    pub dimension: usize,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_rewrite_temperature")]
    pub rewrite_temperature: f32,
    #[serde(default = "default_recommendation_temperature")]
    pub recommendation_temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_llm_model() -> String {
    "gemma3:27b".to_string()
}

fn default_rewrite_temperature() -> f32 {
    0.0
}

fn default_recommendation_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> usize {
    4096
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Country code passed to the shopping search (`gl` parameter)
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "in".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of candidates requested from the index per query
    #[serde(default = "default_retrieval_limit")]
    pub limit: usize,
    /// Multiplier applied to `limit` for the index-side candidate pool
    #[serde(default = "default_over_fetch")]
    pub over_fetch: usize,
    /// Timeout applied to every outbound HTTP call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_retrieval_limit() -> usize {
    5
}

fn default_over_fetch() -> usize {
    2
}

fn default_request_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub embeddings: EmbeddingsConfig,
    pub index: IndexConfig,
    pub llm: LlmConfig,
    pub lookup: LookupConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: default_retrieval_limit(),
            over_fetch: default_over_fetch(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::StyleRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Get embedding endpoint
    pub fn embedding_endpoint(&self) -> &str {
        &self.embeddings.endpoint
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get vector index endpoint
    pub fn index_endpoint(&self) -> &str {
        &self.index.endpoint
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.endpoint
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.model
    }

    /// Get retrieval candidate limit
    pub fn retrieval_limit(&self) -> usize {
        self.retrieval.limit
    }

    /// Get per-call HTTP timeout
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.retrieval.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            embeddings: EmbeddingsConfig {
                endpoint: "http://localhost:11434".to_string(),
                model: "all-minilm".to_string(),
                dimension: 384,
                api_key: None,
            },
            index: IndexConfig {
                endpoint: "https://fashion-384.svc.us-east-1-aws.pinecone.io".to_string(),
                api_key: "your-index-api-key".to_string(),
                namespace: String::new(),
            },
            llm: LlmConfig {
                endpoint: "http://localhost:11434".to_string(),
                api_key: "ollama".to_string(),
                model: default_llm_model(),
                rewrite_temperature: default_rewrite_temperature(),
                recommendation_temperature: default_recommendation_temperature(),
                max_tokens: default_max_tokens(),
            },
            lookup: LookupConfig {
                endpoint: "https://google.serper.dev".to_string(),
                api_key: "your-serper-api-key".to_string(),
                country: default_country(),
            },
            retrieval: RetrievalConfig::default(),
        }
    }
}
