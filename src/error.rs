use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every failure of the metadata endpoints ends up here and is rendered as a
/// JSON `ErrorResponse` with a matching HTTP status code. Nothing is written
/// to the response before this conversion, so a request either gets the full
/// envelope or an error.
#[derive(Debug)]
pub enum ApiError {
    /// Invalid query parameter (bad pagination value, malformed list value)
    InvalidQueryParam(String),
    /// Error raised by the catalog while answering the query
    Catalog(CatalogError),
    /// Assembled response failed outbound validation
    MalformedResponse(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidQueryParam(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid query parameter: {}", msg),
            ),
            ApiError::Catalog(err) => {
                let status = match &err {
                    CatalogError::InvalidKey(_) => StatusCode::BAD_REQUEST,
                    CatalogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!("Catalog error: {}", err);
                }
                (status, format!("Catalog error: {}", err))
            }
            ApiError::MalformedResponse(msg) => {
                tracing::error!("Refusing to send malformed response: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Malformed response: {}", msg),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}
