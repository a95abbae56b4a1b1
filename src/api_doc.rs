use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{DatasetListResponse, ValidValuesResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "dataset-catalog-api",
        version = "1.0.0",
        description = "Read-only metadata queries over a dataset catalog"
    ),
    paths(
        handlers::health::health_handler,
        handlers::datasets::datasets_handler,
        handlers::valid_values::valid_values_handler
    ),
    components(
        schemas(
            DatasetListResponse,
            ValidValuesResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "metadata", description = "Dataset metadata queries")
    )
)]
pub struct ApiDoc;
