//! Recommendation pipeline
//!
//! End-to-end flow from a free-text shopping query to a curated outfit:
//! - Query rewriting constrained to the catalog taxonomy
//! - Nearest-neighbor retrieval over the indexed catalog
//! - Result formatting for LLM consumption
//! - Recommendation generation with a structured output protocol
//! - Product mention resolution to metadata and purchase URLs
//!
//! # Examples
//!
//! ```rust,no_run
//! use stylerag::reco::RecoService;
//! use stylerag::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RecoService::new(&config)?;
//!
//!     let response = service.recommend("red dress for summer").await?;
//!     println!("{}", response.recommendation_text);
//!     println!("{} products resolved", response.products.len());
//!
//!     Ok(())
//! }
//! ```

pub mod formatter;
pub mod generator;
pub mod pipeline;
pub mod resolver;
pub mod retriever;
pub mod rewriter;

pub use formatter::format_results;
pub use generator::RecommendationGenerator;
pub use pipeline::AppRecoService;
pub use pipeline::RecoService;
pub use resolver::ProductResolver;
pub use retriever::Retriever;
pub use rewriter::QueryRewriter;
