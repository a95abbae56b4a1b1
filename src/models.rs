use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a single key constraint: one value, or a list of accepted values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    Scalar(String),
    List(Vec<String>),
}

impl ConstraintValue {
    /// Whether a dataset's value for this key satisfies the constraint
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ConstraintValue::Scalar(expected) => expected == value,
            ConstraintValue::List(accepted) => accepted.iter().any(|v| v == value),
        }
    }
}

/// Key constraints parsed from the query string
pub type Constraints = BTreeMap<String, ConstraintValue>;

/// Key/value combination identifying one dataset
pub type DatasetKeys = BTreeMap<String, String>;

/// Response type for the datasets endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DatasetListResponse {
    /// Key combinations of all datasets on the requested page
    #[schema(example = json!([{"key1": "value1", "key2": "value2"}]))]
    pub datasets: Vec<BTreeMap<String, String>>,
    /// Maximum number of returned items
    pub limit: u32,
    /// Current page
    pub page: u32,
}

impl DatasetListResponse {
    /// Check the assembled payload before it is serialized
    pub fn validate(&self) -> Result<(), String> {
        if self.datasets.len() > self.limit as usize {
            return Err(format!(
                "catalog returned {} datasets for a page of at most {}",
                self.datasets.len(),
                self.limit
            ));
        }

        for (index, dataset) in self.datasets.iter().enumerate() {
            if dataset.is_empty() {
                return Err(format!("dataset at index {} has no keys", index));
            }
            if dataset.keys().any(|key| key.is_empty()) {
                return Err(format!("dataset at index {} has an empty key name", index));
            }
        }

        Ok(())
    }
}

/// Response type for the valid values endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValidValuesResponse {
    /// Valid values for every key, given the supplied constraints
    #[schema(example = json!({"key1": ["value1", "value2"], "key2": ["value3"]}))]
    pub valid_values: BTreeMap<String, Vec<String>>,
}

impl ValidValuesResponse {
    /// Check the assembled payload before it is serialized
    pub fn validate(&self) -> Result<(), String> {
        if self.valid_values.keys().any(|key| key.is_empty()) {
            return Err("valid values contain an empty key name".to_string());
        }
        Ok(())
    }
}
