//! In-memory durable cart store.
//!
//! One record per product, like the PostgreSQL adapter. Availability can be
//! switched off to simulate an outage, and an optional quantity cap makes
//! the store clamp what it is asked to hold.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::cart::{CartStoreError, NewLine, QuantityUpdate, StoredLine};
use crate::domain::foundation::{Price, ProductId, RemoteLineId};
use crate::ports::{CartStore, ConnectError, ConnectionHealth, StoreConnector};

pub struct InMemoryCartStore {
    lines: RwLock<Vec<StoredLine>>,
    available: AtomicBool,
    quantity_cap: Option<u32>,
    next_id: AtomicI64,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self {
            lines: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
            quantity_cap: None,
            next_id: AtomicI64::new(1),
        }
    }

    /// Store that never holds more than `cap` units of one product.
    pub fn with_quantity_cap(cap: u32) -> Self {
        Self {
            quantity_cap: Some(cap),
            ..Self::new()
        }
    }

    /// Simulates an outage (`false`) or recovery (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Current records, as another session would see them.
    pub fn lines(&self) -> Vec<StoredLine> {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Writes a record directly, bypassing the cart engine.
    pub fn insert(
        &self,
        product_id: ProductId,
        name: &str,
        unit_price: Price,
        quantity: u32,
    ) -> StoredLine {
        let record = StoredLine {
            id: self.next_remote_id(),
            product_id,
            name: name.to_string(),
            unit_price,
            quantity,
        };
        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        record
    }

    fn next_remote_id(&self) -> RemoteLineId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        RemoteLineId::from_number(n)
    }

    fn ensure_available(&self) -> Result<(), CartStoreError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(CartStoreError::unreachable("in-memory store is offline"))
        }
    }

    fn clamp(&self, quantity: u32) -> u32 {
        self.quantity_cap.map_or(quantity, |cap| quantity.min(cap))
    }
}

impl Default for InMemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn list_lines(&self) -> Result<Vec<StoredLine>, CartStoreError> {
        self.ensure_available()?;
        Ok(self.lines())
    }

    async fn create_line(&self, line: NewLine) -> Result<StoredLine, CartStoreError> {
        self.ensure_available()?;
        line.validate()?;

        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = lines.iter_mut().find(|l| l.product_id == line.product_id) {
            existing.quantity = self.clamp(existing.quantity.saturating_add(line.quantity));
            return Ok(existing.clone());
        }
        let record = StoredLine {
            id: self.next_remote_id(),
            product_id: line.product_id,
            name: line.name,
            unit_price: line.unit_price,
            quantity: self.clamp(line.quantity),
        };
        lines.push(record.clone());
        Ok(record)
    }

    async fn update_line_quantity(
        &self,
        id: &RemoteLineId,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartStoreError> {
        self.ensure_available()?;
        if quantity == 0 {
            return Err(CartStoreError::validation("quantity must be at least 1"));
        }
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        let line = lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CartStoreError::not_found(id.as_str()))?;
        line.quantity = self.clamp(quantity);
        Ok(QuantityUpdate {
            id: id.clone(),
            quantity: line.quantity,
        })
    }

    async fn delete_line(&self, id: &RemoteLineId) -> Result<(), CartStoreError> {
        self.ensure_available()?;
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        let pos = lines
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| CartStoreError::not_found(id.as_str()))?;
        lines.remove(pos);
        Ok(())
    }
}

#[async_trait]
impl ConnectionHealth for InMemoryCartStore {
    async fn is_healthy(&self) -> bool {
        self.is_available()
    }
}

/// Connecting succeeds while the store is available.
#[async_trait]
impl StoreConnector for Arc<InMemoryCartStore> {
    type Connection = Arc<InMemoryCartStore>;

    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    async fn connect(&self) -> Result<Self::Connection, ConnectError> {
        if self.is_available() {
            Ok(Arc::clone(self))
        } else {
            Err(ConnectError::new("in-memory store is offline"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_line(product: &str, quantity: u32) -> NewLine {
        NewLine {
            product_id: ProductId::new(product).unwrap(),
            name: "Ring".to_string(),
            unit_price: Price::try_new(10.0).unwrap(),
            quantity,
        }
    }

    #[tokio::test]
    async fn create_upserts_by_product() {
        let store = InMemoryCartStore::new();

        let first = store.create_line(new_line("p1", 1)).await.unwrap();
        let second = store.create_line(new_line("p1", 2)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 3);
        assert_eq!(store.lines().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_lines() {
        let store = InMemoryCartStore::new();
        let err = store.create_line(new_line("p1", 0)).await.unwrap_err();
        assert!(matches!(err, CartStoreError::Validation(_)));
    }

    #[tokio::test]
    async fn offline_store_is_unreachable() {
        let store = InMemoryCartStore::new();
        store.set_available(false);

        assert!(matches!(
            store.list_lines().await,
            Err(CartStoreError::Unreachable(_))
        ));
        assert!(!store.is_healthy().await);
    }

    #[tokio::test]
    async fn quantity_cap_clamps_updates() {
        let store = InMemoryCartStore::with_quantity_cap(10);
        let record = store.create_line(new_line("p1", 1)).await.unwrap();

        let update = store.update_line_quantity(&record.id, 50).await.unwrap();

        assert_eq!(update.quantity, 10);
    }

    #[tokio::test]
    async fn missing_lines_are_not_found() {
        let store = InMemoryCartStore::new();
        let id = RemoteLineId::new("ghost").unwrap();

        assert!(matches!(
            store.delete_line(&id).await,
            Err(CartStoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update_line_quantity(&id, 2).await,
            Err(CartStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn connector_follows_availability() {
        let store = Arc::new(InMemoryCartStore::new());
        assert!(store.connect().await.is_ok());

        store.set_available(false);
        assert!(store.connect().await.is_err());
    }
}
