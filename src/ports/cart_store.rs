//! Durable cart store port.
//!
//! Transport-agnostic contract for the persistent collection of cart lines.
//! Implementations may be remote, so every call can fail with
//! [`CartStoreError::Unreachable`].
//!
//! # Contract
//!
//! - `create_line` adds `quantity` units of a product. Stores keep one record
//!   per product and return the record after the write, so the returned
//!   quantity may exceed what was requested.
//! - `update_line_quantity` returns the quantity the store actually holds,
//!   which may differ from the requested one (stores are allowed to clamp).
//! - `delete_line` fails with `NotFound` for unknown ids.

use async_trait::async_trait;

use crate::domain::cart::{CartStoreError, NewLine, QuantityUpdate, StoredLine};
use crate::domain::foundation::RemoteLineId;

/// Port for the durable cart store.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// All persisted lines.
    async fn list_lines(&self) -> Result<Vec<StoredLine>, CartStoreError>;

    /// Adds units of a product.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank name or zero quantity
    /// - `Unreachable` on transport failure
    async fn create_line(&self, line: NewLine) -> Result<StoredLine, CartStoreError>;

    /// Sets the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is unknown
    /// - `Validation` if `quantity` is zero
    /// - `Unreachable` on transport failure
    async fn update_line_quantity(
        &self,
        id: &RemoteLineId,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartStoreError>;

    /// Deletes a line.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is unknown
    /// - `Unreachable` on transport failure
    async fn delete_line(&self, id: &RemoteLineId) -> Result<(), CartStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CartStore) {}
    }
}
