use crate::catalog::Catalog;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
}
