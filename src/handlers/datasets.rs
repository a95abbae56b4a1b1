use crate::error::{ApiError, ErrorResponse};
use crate::models::DatasetListResponse;
use crate::query::{self, PaginationOptions, QueryParams};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /datasets handler - List key combinations of matching datasets
///
/// Every query parameter other than `limit` and `page` is a key constraint.
/// Constraints may be combined freely; a value written as `[a,b]` matches any
/// of the listed values. Returns all known datasets (one page at a time) if no
/// constraints are given.
#[utoipa::path(
    get,
    path = routes::DATASETS,
    params(
        ("limit" = Option<u32>, Query, description = "Maximum number of returned datasets per page (default: 100)"),
        ("page" = Option<u32>, Query, description = "Current dataset page (default: 0)"),
        ("key1" = Option<String>, Query, description = "Value of key1, or a list of values like [value1,value2]", example = "value1"),
        ("key2" = Option<String>, Query, description = "Value of key2, or a list of values like [value1,value2]", example = "value2")
    ),
    responses(
        (status = 200, description = "All available key combinations", body = DatasetListResponse),
        (status = 400, description = "Invalid pagination value, malformed list, or unrecognized key", body = ErrorResponse),
        (status = 500, description = "Catalog error or malformed response", body = ErrorResponse)
    ),
    tag = "metadata"
)]
pub async fn datasets_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<(StatusCode, Json<DatasetListResponse>), ApiError> {
    let PaginationOptions { limit, page } = PaginationOptions::from_params(&params)
        .inspect_err(|e| tracing::warn!("Rejected datasets query: {:?}", e))?;

    let constraints = query::parse_constraints(params, &[query::LIMIT, query::PAGE])
        .inspect_err(|e| tracing::warn!("Rejected datasets query: {:?}", e))?;
    let constraints = query::into_filter(constraints);

    let datasets = state.catalog.datasets(constraints.as_ref(), page, limit)?;

    let response = DatasetListResponse {
        datasets,
        limit,
        page,
    };
    response.validate().map_err(ApiError::MalformedResponse)?;

    tracing::info!(
        "Listed {} datasets (keys: {:?}, limit: {}, page: {})",
        response.datasets.len(),
        constraints.as_ref().map(|c| c.keys().collect::<Vec<_>>()),
        limit,
        page
    );

    Ok((StatusCode::OK, Json(response)))
}
