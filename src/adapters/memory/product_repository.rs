//! In-memory product repository.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::ProductRepository;

/// Keeps products in insertion order.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `products`.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().collect()),
        }
    }
}

fn not_found(id: &ProductId) -> DomainError {
    DomainError::new(ErrorCode::ProductNotFound, format!("Product not found: {}", id))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        if products.iter().any(|p| p.id() == product.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Duplicate product id: {}", product.id()),
            ));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let slot = products
            .iter_mut()
            .find(|p| p.id() == product.id())
            .ok_or_else(|| not_found(product.id()))?;
        *slot = product.clone();
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let pos = products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| not_found(id))?;
        products.remove(pos);
        Ok(())
    }
}
