use crate::error::{ApiError, ErrorResponse};
use crate::models::ValidValuesResponse;
use crate::query::{self, QueryParams};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /valid_values handler - Valid values of every key
///
/// Given values for some keys, returns the values still available for every
/// key. All query parameters are key constraints; there is no pagination.
#[utoipa::path(
    get,
    path = routes::VALID_VALUES,
    params(
        ("key1" = Option<String>, Query, description = "Value of key1, or a list of values like [value1,value2]", example = "value1"),
        ("key2" = Option<String>, Query, description = "Value of key2, or a list of values like [value1,value2]", example = "value2")
    ),
    responses(
        (status = 200, description = "Valid values for every key", body = ValidValuesResponse),
        (status = 400, description = "Malformed list or unrecognized key", body = ErrorResponse),
        (status = 500, description = "Catalog error or malformed response", body = ErrorResponse)
    ),
    tag = "metadata"
)]
pub async fn valid_values_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<(StatusCode, Json<ValidValuesResponse>), ApiError> {
    let constraints = query::parse_constraints(params, &[])
        .inspect_err(|e| tracing::warn!("Rejected valid values query: {:?}", e))?;
    let constraints = query::into_filter(constraints);

    let valid_values = state.catalog.valid_values(constraints.as_ref())?;

    let response = ValidValuesResponse { valid_values };
    response.validate().map_err(ApiError::MalformedResponse)?;

    tracing::info!(
        "Resolved valid values for {} keys (constrained keys: {:?})",
        response.valid_values.len(),
        constraints.as_ref().map(|c| c.keys().collect::<Vec<_>>())
    );

    Ok((StatusCode::OK, Json(response)))
}
