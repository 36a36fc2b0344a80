//! UpdateProductHandler - Command handler for partial product updates.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductChanges, ProductError};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Command to update a product. Only supplied fields change.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub changes: ProductChanges,
}

/// Handler for updating products.
pub struct UpdateProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl UpdateProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateProductCommand) -> Result<Product, ProductError> {
        // 1. Load
        let mut product = self
            .repository
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| ProductError::not_found(cmd.product_id.clone()))?;

        // 2. Apply changes
        product.apply(cmd.changes)?;

        // 3. Persist
        self.repository.update(&product).await?;

        Ok(product)
    }
}
