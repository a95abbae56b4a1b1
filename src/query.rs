use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{ConstraintValue, Constraints};

pub const LIMIT: &str = "limit";
pub const PAGE: &str = "page";

pub const DEFAULT_LIMIT: u32 = 100;
pub const DEFAULT_PAGE: u32 = 0;

/// Raw query string as a flat key/value mapping
///
/// Keys are never rejected here. When a key is repeated, its first value wins.
#[derive(Debug, Default)]
pub struct QueryParams(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| ApiError::InvalidQueryParam(rejection.body_text()))?;

        let mut params = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            params.entry(key).or_insert(value);
        }

        Ok(QueryParams(params))
    }
}

/// Validated pagination options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    pub limit: u32,
    pub page: u32,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl PaginationOptions {
    /// Extract `limit` and `page`, falling back to their defaults when absent
    ///
    /// Non-integer, negative, and out-of-range values are rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        Ok(Self {
            limit: parse_non_negative(LIMIT, params.get(LIMIT), DEFAULT_LIMIT)?,
            page: parse_non_negative(PAGE, params.get(PAGE), DEFAULT_PAGE)?,
        })
    }
}

fn parse_non_negative(name: &str, raw: Option<&String>, default: u32) -> Result<u32, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value = raw.parse::<i64>().map_err(|_| {
        ApiError::InvalidQueryParam(format!("{} must be an integer, got '{}'", name, raw))
    })?;

    if value < 0 {
        return Err(ApiError::InvalidQueryParam(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }

    u32::try_from(value).map_err(|_| {
        ApiError::InvalidQueryParam(format!("{} must be at most {}, got {}", name, u32::MAX, value))
    })
}

/// Turn every non-reserved query parameter into a key constraint
pub fn parse_constraints(
    params: HashMap<String, String>,
    reserved: &[&str],
) -> Result<Constraints, ApiError> {
    params
        .into_iter()
        .filter(|(key, _)| !reserved.contains(&key.as_str()))
        .map(|(key, raw)| {
            let value = parse_constraint_value(&key, raw)?;
            Ok((key, value))
        })
        .collect()
}

/// Decode a single query value, expanding `[a,b,c]` into a list
///
/// `[]` decodes to an empty list. Items are split on `,` verbatim; an item
/// containing `[` or `]` is rejected since there is no escaping.
pub fn parse_constraint_value(key: &str, raw: String) -> Result<ConstraintValue, ApiError> {
    let Some(inner) = bracketed(&raw) else {
        return Ok(ConstraintValue::Scalar(raw));
    };

    if inner.is_empty() {
        return Ok(ConstraintValue::List(Vec::new()));
    }

    let items: Vec<String> = inner.split(',').map(str::to_string).collect();
    if items.iter().any(|item| item.contains(['[', ']'])) {
        return Err(ApiError::InvalidQueryParam(format!(
            "value of '{}' is not a valid list: items must not contain '[' or ']', got '{}'",
            key, raw
        )));
    }

    Ok(ConstraintValue::List(items))
}

// Interior of a value matching ^\[.*\]$ (no line breaks inside)
fn bracketed(raw: &str) -> Option<&str> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    (!inner.contains('\n')).then_some(inner)
}

/// `None` for an empty mapping, meaning "unfiltered"
pub fn into_filter(constraints: Constraints) -> Option<Constraints> {
    (!constraints.is_empty()).then_some(constraints)
}
