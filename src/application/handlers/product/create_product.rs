//! CreateProductHandler - Command handler for adding catalog products.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductError};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Command to create a product.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

/// Handler for creating products.
pub struct CreateProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl CreateProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateProductCommand) -> Result<Product, ProductError> {
        // 1. Build and validate
        let product = Product::new(ProductId::generate(), cmd.name, cmd.price, cmd.image)?;

        // 2. Persist
        self.repository.save(&product).await?;

        tracing::info!(product_id = %product.id(), "Product created");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;

    fn command(name: &str, price: f64) -> CreateProductCommand {
        CreateProductCommand {
            name: name.to_string(),
            price,
            image: Some("ring.png".to_string()),
        }
    }

    #[tokio::test]
    async fn creates_and_persists_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let handler = CreateProductHandler::new(repo.clone());

        let product = handler.handle(command("  Diamond Ring ", 2999.0)).await.unwrap();

        assert_eq!(product.name(), "Diamond Ring");
        assert_eq!(product.image(), "ring.png");
        let stored = repo.find_by_id(product.id()).await.unwrap();
        assert_eq!(stored, Some(product));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let handler = CreateProductHandler::new(repo.clone());

        let err = handler.handle(command("   ", 10.0)).await.unwrap_err();

        assert!(matches!(err, ProductError::ValidationFailed { ref field, .. } if field == "name"));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let handler = CreateProductHandler::new(Arc::new(InMemoryProductRepository::new()));

        let err = handler.handle(command("Ring", -1.0)).await.unwrap_err();

        assert!(matches!(err, ProductError::ValidationFailed { ref field, .. } if field == "price"));
    }
}
