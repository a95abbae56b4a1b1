use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::{Catalog, CatalogError};
use crate::models::{Constraints, DatasetKeys};

/// On-disk layout of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    keys: Vec<String>,
    datasets: Vec<DatasetKeys>,
}

/// Read-only catalog held entirely in memory
///
/// Datasets are kept sorted by their key values, compared in the order the
/// keys were declared, so pages are stable across requests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    keys: Vec<String>,
    datasets: Vec<DatasetKeys>,
}

impl MemoryCatalog {
    /// Catalog without keys or datasets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from declared key names and dataset key combinations
    ///
    /// # Errors
    /// Returns an error if key names are empty or repeated, if a dataset does
    /// not define exactly the declared keys, or if two datasets share the same
    /// key combination
    pub fn new(keys: Vec<String>, mut datasets: Vec<DatasetKeys>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for key in &keys {
            if key.is_empty() {
                bail!("key names must not be empty");
            }
            if !seen.insert(key.as_str()) {
                bail!("key '{}' is declared more than once", key);
            }
        }

        for (index, dataset) in datasets.iter().enumerate() {
            let missing: Vec<&str> = keys
                .iter()
                .filter(|key| !dataset.contains_key(*key))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                bail!("dataset {} is missing keys: {}", index, missing.join(", "));
            }
            let extra: Vec<&str> = dataset
                .keys()
                .filter(|key| !seen.contains(key.as_str()))
                .map(String::as_str)
                .collect();
            if !extra.is_empty() {
                bail!("dataset {} has undeclared keys: {}", index, extra.join(", "));
            }
        }

        datasets.sort_by_cached_key(|dataset| ordering_key(&keys, dataset));
        if let Some(pair) = datasets.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("duplicate dataset: {:?}", pair[0]);
        }

        Ok(Self { keys, datasets })
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Self::new(file.keys, file.datasets)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid catalog file {}", path.display()))
    }

    /// Declared key names, in order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of datasets held
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    fn check_keys(&self, constraints: &Constraints) -> Result<(), CatalogError> {
        let unknown: Vec<String> = constraints
            .keys()
            .filter(|key| !self.keys.contains(*key))
            .cloned()
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::InvalidKey(unknown))
        }
    }

    fn matching<'a>(
        &'a self,
        constraints: Option<&'a Constraints>,
    ) -> Result<impl Iterator<Item = &'a DatasetKeys> + 'a, CatalogError> {
        if let Some(constraints) = constraints {
            self.check_keys(constraints)?;
        }

        Ok(self.datasets.iter().filter(move |dataset| {
            constraints.is_none_or(|constraints| {
                constraints.iter().all(|(key, expected)| {
                    dataset
                        .get(key)
                        .is_some_and(|value| expected.matches(value))
                })
            })
        }))
    }
}

fn ordering_key(keys: &[String], dataset: &DatasetKeys) -> Vec<String> {
    keys.iter()
        .map(|key| dataset.get(key).cloned().unwrap_or_default())
        .collect()
}

impl Catalog for MemoryCatalog {
    fn datasets(
        &self,
        constraints: Option<&Constraints>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<DatasetKeys>, CatalogError> {
        let limit = limit as usize;
        let offset = (page as usize).saturating_mul(limit);

        Ok(self
            .matching(constraints)?
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn valid_values(
        &self,
        constraints: Option<&Constraints>,
    ) -> Result<BTreeMap<String, Vec<String>>, CatalogError> {
        let mut values: BTreeMap<&str, BTreeSet<&str>> = self
            .keys
            .iter()
            .map(|key| (key.as_str(), BTreeSet::new()))
            .collect();

        for dataset in self.matching(constraints)? {
            for (key, value) in dataset {
                if let Some(set) = values.get_mut(key.as_str()) {
                    set.insert(value.as_str());
                }
            }
        }

        Ok(values
            .into_iter()
            .map(|(key, set)| (key.to_string(), set.into_iter().map(str::to_string).collect()))
            .collect())
    }
}
