//! Complete recommendation pipeline: Rewrite -> Retrieve -> Format -> Generate -> Resolve

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingService;
use crate::embeddings::TextEmbedder;
use crate::errors::Result;
use crate::errors::StyleRagError;
use crate::index::NearestNeighborIndex;
use crate::index::VectorIndexClient;
use crate::llm::LlmService;
use crate::llm::TextGenerator;
use crate::lookup::SerperClient;
use crate::lookup::ShoppingLookup;
use crate::models::RecommendationResponse;
use crate::reco::format_results;
use crate::reco::ProductResolver;
use crate::reco::QueryRewriter;
use crate::reco::RecommendationGenerator;
use crate::reco::Retriever;
use crate::taxonomy::Taxonomy;

/// The service wired to the production collaborators
pub type AppRecoService = RecoService<EmbeddingService, VectorIndexClient, LlmService, SerperClient>;

/// Complete recommendation service.
///
/// Owns all transient state for a request; only read-only handles (taxonomy,
/// HTTP clients) are shared across concurrent requests. Generic over the
/// collaborator seams so the pipeline is testable without live services.
pub struct RecoService<E, I, G, L> {
    rewriter: QueryRewriter<G>,
    retriever: Retriever<E, I>,
    generator: RecommendationGenerator<G>,
    resolver: ProductResolver<L>,
    retrieval_limit: usize,
}

impl AppRecoService {
    /// Create a new recommendation service
    ///
    /// # Errors
    /// - HTTP client configuration errors (invalid endpoints, TLS setup)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let taxonomy = Arc::new(Taxonomy::default());
        let embedding_service = Arc::new(EmbeddingService::new(config)?);
        let index = Arc::new(VectorIndexClient::new(config)?);
        let llm = Arc::new(LlmService::new(config)?);
        let lookup = SerperClient::new(config)?;

        Ok(Self::from_services(
            config,
            taxonomy,
            embedding_service,
            index,
            llm,
            lookup,
        ))
    }
}

impl<E, I, G, L> RecoService<E, I, G, L>
where
    E: TextEmbedder,
    I: NearestNeighborIndex,
    G: TextGenerator,
    L: ShoppingLookup,
{
    /// Create from existing services
    #[must_use]
    pub fn from_services(
        config: &AppConfig,
        taxonomy: Arc<Taxonomy>,
        embedding_service: Arc<E>,
        index: Arc<I>,
        llm: Arc<G>,
        lookup: L,
    ) -> Self {
        let rewriter = QueryRewriter::new(
            llm.clone(),
            taxonomy,
            config.llm.rewrite_temperature,
            config.llm.max_tokens,
        );
        let retriever = Retriever::new(embedding_service, index, config.retrieval.over_fetch);
        let generator = RecommendationGenerator::new(
            llm,
            config.llm.recommendation_temperature,
            config.llm.max_tokens,
        );
        let resolver = ProductResolver::new(lookup);

        Self {
            rewriter,
            retriever,
            generator,
            resolver,
            retrieval_limit: config.retrieval_limit(),
        }
    }

    /// Run one query through the whole pipeline.
    ///
    /// Steps are strictly sequential; each step's output feeds the next.
    /// Empty retrieval short-circuits with `NoResults` before any later step
    /// runs, and that outcome is distinct from a server failure.
    pub async fn recommend(&self, query: &str) -> Result<RecommendationResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(StyleRagError::Validation("query must not be empty".to_string()));
        }

        info!("Processing recommendation query: {}", query);

        debug!("Step 1: Rewriting query");
        let enhanced_query = self.rewriter.rewrite(query).await?;

        debug!("Step 2: Retrieving candidates");
        let search_results = self
            .retriever
            .search(&enhanced_query, self.retrieval_limit)
            .await?;

        if search_results.is_empty() {
            info!("No matching products for query: {}", query);
            return Err(StyleRagError::NoResults);
        }

        debug!("Step 3: Formatting {} results", search_results.len());
        let formatted_results = format_results(&search_results);

        debug!("Step 4: Generating recommendation");
        let recommendation_text = self.generator.generate(query, &formatted_results).await?;

        debug!("Step 5: Resolving product mentions");
        let products = self
            .resolver
            .resolve(&recommendation_text, &search_results)
            .await?;

        info!(
            "Recommendation completed: {} products resolved",
            products.len()
        );

        Ok(RecommendationResponse {
            recommendation_text,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    use axum::http::StatusCode;
    use serde_json::Value;

    use super::*;
    use crate::api::handlers::error_status;
    use crate::index::IndexMatch;
    use crate::models::ItemMetadata;

    struct FixedEmbedder;

    impl TextEmbedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0; 4])
        }
    }

    struct FixedIndex {
        matches: Vec<IndexMatch>,
    }

    impl NearestNeighborIndex for FixedIndex {
        async fn query(
            &self,
            _vector: &[f32],
            _top_k: usize,
            _filter: Option<Value>,
        ) -> Result<Vec<IndexMatch>> {
            Ok(self.matches.clone())
        }
    }

    struct CountingLlm {
        calls: AtomicUsize,
        reply: String,
    }

    impl TextGenerator for &CountingLlm {
        async fn generate(
            &self,
            _prompt: &str,
            _temperature: f32,
            _max_tokens: usize,
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    struct RecordingLookup {
        calls: Mutex<Vec<String>>,
    }

    impl ShoppingLookup for &RecordingLookup {
        async fn search_product(&self, product_name: &str) -> Result<String> {
            self.calls.lock().unwrap().push(product_name.to_string());
            Ok(format!("https://shop.example/{product_name}"))
        }
    }

    fn service<'a>(
        matches: Vec<IndexMatch>,
        llm: &'a CountingLlm,
        lookup: &'a RecordingLookup,
    ) -> RecoService<FixedEmbedder, FixedIndex, &'a CountingLlm, &'a RecordingLookup> {
        RecoService::from_services(
            &AppConfig::default(),
            Arc::new(Taxonomy::default()),
            Arc::new(FixedEmbedder),
            Arc::new(FixedIndex { matches }),
            Arc::new(llm),
            lookup,
        )
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_before_any_call() {
        let llm = CountingLlm {
            calls: AtomicUsize::new(0),
            reply: String::new(),
        };
        let lookup = RecordingLookup {
            calls: Mutex::new(Vec::new()),
        };
        let err = service(vec![], &llm, &lookup).recommend("   ").await.unwrap_err();
        assert!(matches!(err, StyleRagError::Validation(_)));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_retrieval_yields_not_found_without_later_stages() {
        let llm = CountingLlm {
            calls: AtomicUsize::new(0),
            reply: "Looking for a Dresses in the Apparel - Dress category.".to_string(),
        };
        let lookup = RecordingLookup {
            calls: Mutex::new(Vec::new()),
        };

        let err = service(vec![], &llm, &lookup)
            .recommend("red dress for summer")
            .await
            .unwrap_err();

        assert!(matches!(err, StyleRagError::NoResults));
        assert_eq!(error_status(&err), StatusCode::NOT_FOUND);
        // Only the rewrite call ran; generation and resolution never did
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert!(lookup.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_runs_all_stages_with_matches() {
        let llm = CountingLlm {
            calls: AtomicUsize::new(0),
            reply: "<response>Try the [Blue Kurta]!</response>".to_string(),
        };
        let lookup = RecordingLookup {
            calls: Mutex::new(Vec::new()),
        };
        let matches = vec![IndexMatch {
            id: "1".to_string(),
            score: 0.9,
            metadata: ItemMetadata {
                product_display_name: Some("Blue Kurta".to_string()),
                master_category: Some("Apparel".to_string()),
                sub_category: Some("Topwear".to_string()),
                ..Default::default()
            },
        }];

        let response = service(matches, &llm, &lookup)
            .recommend("blue kurta")
            .await
            .unwrap();

        assert_eq!(response.recommendation_text, "Try the [Blue Kurta]!");
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].category, "Apparel - Topwear");
        // Rewrite plus generation
        assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
        assert_eq!(*lookup.calls.lock().unwrap(), ["Blue Kurta"]);
    }

    #[tokio::test]
    #[ignore = "Requires live embedding, index, LLM and lookup services"]
    async fn test_full_pipeline() {
        let config = AppConfig::load().unwrap();
        let service = AppRecoService::new(&config).unwrap();
        let response = service.recommend("red dress for summer").await.unwrap();
        assert!(!response.recommendation_text.is_empty());
        assert!(!response.products.is_empty());
    }
}
