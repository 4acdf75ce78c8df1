//! API request and response types

use serde::Serialize;

/// Standard API response wrapper for auxiliary endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
