//! Shared test infrastructure for the HTTP handlers
//!
//! `RecordingCatalog` answers with canned data and records every call it
//! receives, so tests can check exactly what reached the catalog.

use axum::{body::Body, http::Request, http::StatusCode, Router};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::app::build_app;
use crate::catalog::{Catalog, CatalogError};
use crate::models::{Constraints, DatasetKeys};
use crate::state::AppState;

type DatasetCall = (Option<Constraints>, u32, u32);

/// Catalog double returning canned answers and recording its arguments
#[derive(Default)]
pub struct RecordingCatalog {
    datasets: Vec<DatasetKeys>,
    valid_values: BTreeMap<String, Vec<String>>,
    invalid_key: bool,
    unhealthy: bool,
    dataset_calls: Mutex<Vec<DatasetCall>>,
    valid_values_calls: Mutex<Vec<Option<Constraints>>>,
}

impl RecordingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every datasets call with these datasets, ignoring pagination
    pub fn with_datasets(mut self, datasets: Vec<DatasetKeys>) -> Self {
        self.datasets = datasets;
        self
    }

    pub fn with_valid_values(mut self, valid_values: BTreeMap<String, Vec<String>>) -> Self {
        self.valid_values = valid_values;
        self
    }

    /// Reject every constrained call as if all keys were unknown
    pub fn failing_with_invalid_key(mut self) -> Self {
        self.invalid_key = true;
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    pub fn dataset_calls(&self) -> Vec<DatasetCall> {
        self.dataset_calls.lock().unwrap().clone()
    }

    pub fn valid_values_calls(&self) -> Vec<Option<Constraints>> {
        self.valid_values_calls.lock().unwrap().clone()
    }

    fn check_keys(&self, constraints: Option<&Constraints>) -> Result<(), CatalogError> {
        match constraints {
            Some(constraints) if self.invalid_key => Err(CatalogError::InvalidKey(
                constraints.keys().cloned().collect(),
            )),
            _ => Ok(()),
        }
    }
}

impl Catalog for RecordingCatalog {
    fn datasets(
        &self,
        constraints: Option<&Constraints>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<DatasetKeys>, CatalogError> {
        self.dataset_calls
            .lock()
            .unwrap()
            .push((constraints.cloned(), page, limit));
        self.check_keys(constraints)?;
        Ok(self.datasets.clone())
    }

    fn valid_values(
        &self,
        constraints: Option<&Constraints>,
    ) -> Result<BTreeMap<String, Vec<String>>, CatalogError> {
        self.valid_values_calls
            .lock()
            .unwrap()
            .push(constraints.cloned());
        self.check_keys(constraints)?;
        Ok(self.valid_values.clone())
    }

    fn health_check(&self) -> Result<(), CatalogError> {
        if self.unhealthy {
            Err(CatalogError::Unavailable("catalog offline".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Build a dataset key combination from pairs
pub fn dataset(pairs: &[(&str, &str)]) -> DatasetKeys {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn setup_test_app(catalog: Arc<dyn Catalog>) -> Router {
    build_app(AppState { catalog })
}

/// Send a GET request and decode the JSON body
pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
