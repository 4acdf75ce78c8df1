//! API request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use crate::api::types::ApiResponse;
use crate::api::types::ErrorBody;
use crate::api::types::HealthResponse;
use crate::errors::StyleRagError;
use crate::models::RecommendationRequest;
use crate::models::RecommendationResponse;
use crate::reco::AppRecoService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub reco_service: Arc<AppRecoService>,
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Recommendation endpoint (POST /recommendations)
pub async fn recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, (StatusCode, Json<ErrorBody>)> {
    info!("POST /recommendations: {}", req.query);

    match state.reco_service.recommend(&req.query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Error in recommendation endpoint: {}", e);
            Err((
                error_status(&e),
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// Map pipeline errors to client-visible status codes.
///
/// Zero matches is a distinct "not found" outcome, not a server fault; a
/// malformed request is the caller's fault; everything else is a 500 carrying
/// the error message.
pub fn error_status(error: &StyleRagError) -> StatusCode {
    match error {
        StyleRagError::NoResults => StatusCode::NOT_FOUND,
        StyleRagError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_results_maps_to_not_found() {
        assert_eq!(error_status(&StyleRagError::NoResults), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = StyleRagError::Validation("query must not be empty".to_string());
        assert_eq!(error_status(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_failures_map_to_internal_error() {
        for err in [
            StyleRagError::Generation("model down".to_string()),
            StyleRagError::MalformedOutput("no markers".to_string()),
            StyleRagError::Retrieval("index down".to_string()),
            StyleRagError::Resolution("lookup down".to_string()),
        ] {
            assert_eq!(error_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
