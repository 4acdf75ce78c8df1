//! HTTP client for the external vector index

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::errors::StyleRagError;
use crate::models::CatalogItem;
use crate::models::ItemMetadata;

/// One raw hit from the index
#[derive(Debug, Clone, Deserialize)]
pub struct IndexMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

/// Client for the vector index HTTP API
pub struct VectorIndexClient {
    endpoint: String,
    api_key: String,
    namespace: String,
    client: Client,
}

impl VectorIndexClient {
    /// Create a new index client
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: config.index.endpoint.clone(),
            api_key: config.index.api_key.clone(),
            namespace: config.index.namespace.clone(),
            client,
        })
    }

    /// Query the index for the nearest neighbors of a vector
    ///
    /// Matches come back in the index's ranking order (descending cosine
    /// similarity). An optional metadata filter narrows the candidate set.
    pub async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<Value>,
    ) -> Result<Vec<IndexMatch>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct QueryRequest<'a> {
            vector: &'a [f32],
            top_k: usize,
            include_metadata: bool,
            namespace: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            filter: Option<Value>,
        }

        #[derive(Deserialize)]
        struct QueryResponse {
            #[serde(default)]
            matches: Vec<IndexMatch>,
        }

        let url = format!("{}/query", self.endpoint);
        debug!("Querying vector index: {} (top_k={})", url, top_k);

        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace: &self.namespace,
            filter,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
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
            return Err(StyleRagError::Retrieval(format!(
                "Index query error ({status}): {error_text}"
            )));
        }

        let result: QueryResponse = response
            .json()
            .await
            .map_err(|e| StyleRagError::Retrieval(format!("Failed to parse response: {e}")))?;

        Ok(result.matches)
    }

    /// Upsert a batch of catalog items
    pub async fn upsert(&self, items: &[CatalogItem]) -> Result<()> {
        #[derive(Serialize)]
        struct VectorRecord<'a> {
            id: &'a str,
            values: &'a [f32],
            metadata: &'a ItemMetadata,
        }

        #[derive(Serialize)]
        struct UpsertRequest<'a> {
            vectors: Vec<VectorRecord<'a>>,
            namespace: &'a str,
        }

        let url = format!("{}/vectors/upsert", self.endpoint);
        debug!("Upserting {} vectors to index", items.len());

        let request = UpsertRequest {
            vectors: items
                .iter()
                .map(|item| VectorRecord {
                    id: &item.id,
                    values: &item.embedding,
                    metadata: &item.metadata,
                })
                .collect(),
            namespace: &self.namespace,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
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
            return Err(StyleRagError::Retrieval(format!(
                "Index upsert error ({status}): {error_text}"
            )));
        }

        Ok(())
    }

    /// Delete vectors by id
    pub async fn delete(&self, ids: &[String]) -> Result<()> {
        #[derive(Serialize)]
        struct DeleteRequest<'a> {
            ids: &'a [String],
            namespace: &'a str,
        }

        let url = format!("{}/vectors/delete", self.endpoint);
        debug!("Deleting {} vectors from index", ids.len());

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&DeleteRequest {
                ids,
                namespace: &self.namespace,
            })
            .send()
            .await
            .map_err(|e| StyleRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StyleRagError::Retrieval(format!(
                "Index delete error ({status}): {error_text}"
            )));
        }

        Ok(())
    }
}

impl crate::index::NearestNeighborIndex for VectorIndexClient {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<Value>,
    ) -> Result<Vec<IndexMatch>> {
        VectorIndexClient::query(self, vector, top_k, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_deserializes_with_missing_metadata_fields() {
        let raw = r#"{
            "id": "59062",
            "score": 0.91,
            "metadata": {
                "productDisplayName": "Global Desi Women Multi Coloured Kurta",
                "masterCategory": "Apparel",
                "image_id": 59062
            }
        }"#;
        let parsed: IndexMatch = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.metadata.product_display_name.as_deref(),
            Some("Global Desi Women Multi Coloured Kurta")
        );
        assert!(parsed.metadata.season.is_none());
    }
}
