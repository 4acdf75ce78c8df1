use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleRagError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("No matching products found")]
    NoResults,

    #[error("Resolution error: {0}")]
    Resolution(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StyleRagError>;
