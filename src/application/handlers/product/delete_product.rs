//! DeleteProductHandler - Command handler for removing catalog products.

use std::sync::Arc;

use crate::domain::catalog::ProductError;
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Command to delete a product.
#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

/// Handler for deleting products.
pub struct DeleteProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl DeleteProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteProductCommand) -> Result<(), ProductError> {
        if self.repository.find_by_id(&cmd.product_id).await?.is_none() {
            return Err(ProductError::not_found(cmd.product_id));
        }
        self.repository.delete(&cmd.product_id).await?;
        tracing::info!(product_id = %cmd.product_id, "Product deleted");
        Ok(())
    }
}
