pub mod memory;

pub use memory::MemoryCatalog;

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Constraints, DatasetKeys};

/// Errors raised by a catalog while answering a metadata query
#[derive(Debug)]
pub enum CatalogError {
    /// Constraint refers to keys the catalog does not know
    InvalidKey(Vec<String>),
    /// Catalog backend cannot be reached
    Unavailable(String),
    /// Any other failure inside the catalog
    Internal(anyhow::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidKey(keys) => {
                write!(f, "unrecognized keys in constraint: {}", keys.join(", "))
            }
            CatalogError::Unavailable(msg) => write!(f, "catalog unavailable: {}", msg),
            CatalogError::Internal(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Internal(err)
    }
}

/// Dataset lookup and valid-value resolution behind the metadata endpoints
///
/// `None` constraints mean "unfiltered"; implementations never receive an
/// empty mapping from the handlers.
pub trait Catalog: Send + Sync {
    /// Key combinations of the datasets matching `constraints`, restricted to
    /// the `page`-th window of `limit` entries
    fn datasets(
        &self,
        constraints: Option<&Constraints>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<DatasetKeys>, CatalogError>;

    /// Valid values of every key among datasets matching `constraints`
    fn valid_values(
        &self,
        constraints: Option<&Constraints>,
    ) -> Result<BTreeMap<String, Vec<String>>, CatalogError>;

    /// Verify the catalog is able to answer queries
    fn health_check(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}
