//! External product-search lookup
//!
//! Resolves a product display name to a single best-match purchase URL via a
//! Serper-style shopping search API. One network round trip per call.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::Result;
use crate::errors::StyleRagError;

/// Name-to-URL resolution seam; the resolver is generic over this so tests
/// can substitute a local implementation.
pub trait ShoppingLookup {
    /// Resolve a product name to its best-match purchase URL
    fn search_product(
        &self,
        product_name: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Client for the Serper shopping search API
pub struct SerperClient {
    endpoint: String,
    api_key: String,
    country: String,
    client: Client,
}

impl SerperClient {
    /// Create a new lookup client
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: config.lookup.endpoint.clone(),
            api_key: config.lookup.api_key.clone(),
            country: config.lookup.country.clone(),
            client,
        })
    }
}

impl ShoppingLookup for SerperClient {
    async fn search_product(&self, product_name: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct ShoppingResponse {
            #[serde(default)]
            shopping: Vec<ShoppingEntry>,
        }

        #[derive(Deserialize)]
        struct ShoppingEntry {
            link: String,
        }

        let url = format!("{}/shopping", self.endpoint);
        debug!("Looking up product: {}", product_name);

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "q": product_name, "gl": self.country }))
            .send()
            .await
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StyleRagError::Resolution(format!(
                "Shopping API error ({status}): {error_text}"
            )));
        }

        let result: ShoppingResponse = response
            .json()
            .await
            .map_err(|e| StyleRagError::Resolution(format!("Failed to parse response: {e}")))?;

        result
            .shopping
            .into_iter()
            .next()
            .map(|entry| entry.link)
            .ok_or_else(|| {
                StyleRagError::Resolution(format!("No shopping results for: {product_name}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    #[ignore = "Requires Serper API key"]
    async fn test_serper_lookup() {
        let config = AppConfig::load().unwrap();
        let lookup = SerperClient::new(&config).unwrap();
        let url = lookup.search_product("Basics Men Blue T-shirt").await.unwrap();
        assert!(url.starts_with("http"));
    }
}
