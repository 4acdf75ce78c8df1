pub mod api;
pub mod catalog;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod index;
pub mod llm;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod reco;
pub mod taxonomy;

pub use config::AppConfig;
pub use errors::*;
