//! ListProductsHandler - Query handler for the product catalog.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductError};
use crate::ports::ProductRepository;

/// Query for every product in the catalog.
#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery;

/// Handler for listing products.
pub struct ListProductsHandler {
    repository: Arc<dyn ProductRepository>,
}

impl ListProductsHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, _query: ListProductsQuery) -> Result<Vec<Product>, ProductError> {
        Ok(self.repository.list().await?)
    }
}
