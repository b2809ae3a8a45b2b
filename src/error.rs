use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant renders as `{"error": "..."}`. Everything maps to 500 except
/// a malformed distance body, which is reported as a client error.
#[derive(Debug)]
pub enum ApiError {
    /// Backing store operation error
    DatabaseError(anyhow::Error),
    /// Place search or language model provider failure
    UpstreamError(anyhow::Error),
    /// A provider credential required by this endpoint is not configured
    MissingCredential(&'static str),
    /// JSON parsing error
    JsonError(serde_json::Error),
    /// Request body of a store or review call that is not valid JSON
    InvalidBody(serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::DatabaseError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {:#}", err),
            ),
            ApiError::UpstreamError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Upstream error: {:#}", err),
            ),
            ApiError::MissingCredential(name) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} is not configured", name),
            ),
            ApiError::JsonError(err) => (
                StatusCode::BAD_REQUEST,
                format!("JSON parse error: {}", err),
            ),
            ApiError::InvalidBody(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invalid request body: {}", err),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err)
    }
}
