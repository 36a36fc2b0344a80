//! Product repository port.

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ProductId};

/// Repository port for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, oldest first.
    async fn list(&self) -> Result<Vec<Product>, DomainError>;

    /// Find a product by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Save a new product.
    async fn save(&self, product: &Product) -> Result<(), DomainError>;

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;
}
