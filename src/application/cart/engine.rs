//! Cart reconciliation engine.
//!
//! Owns the local cart view and keeps it eventually consistent with the
//! durable cart store using optimistic updates:
//!
//! 1. Every mutation is applied to the local view synchronously, before any
//!    store call starts, and the resulting view is returned at once.
//! 2. The store call is started on its own task right away, so it runs to
//!    completion even if the caller stops waiting. Its confirmation is
//!    folded back into the view by product id (for creates) or local line
//!    id (for quantity updates).
//! 3. Store failures are reported in the [`SyncOutcome`] and logged. They
//!    never roll back the local view.
//!
//! Confirmations carry no sequence numbers, so a stale quantity
//! confirmation that arrives after a newer local edit still overwrites it.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::join_all;

use super::outcome::{Mutation, SyncOutcome};
use crate::domain::cart::{CartError, CartSnapshot, CartStoreError, LocalView, NewLine};
use crate::domain::foundation::{LineId, Price, ProductId, RemoteLineId, ValidationError};
use crate::ports::CartStore;

/// Default for how long callers wait on a durable write before answering
/// with `SyncOutcome::Pending`.
pub const DEFAULT_SYNC_WAIT: Duration = Duration::from_secs(5);

/// The engine for one cart.
///
/// Cheap to clone; clones share the same view and store.
#[derive(Clone)]
pub struct CartEngine {
    view: Arc<Mutex<LocalView>>,
    store: Arc<dyn CartStore>,
    sync_wait: Duration,
}

impl CartEngine {
    /// Creates an engine with an empty local view.
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self {
            view: Arc::new(Mutex::new(LocalView::new())),
            store,
            sync_wait: DEFAULT_SYNC_WAIT,
        }
    }

    pub fn with_sync_wait(mut self, wait: Duration) -> Self {
        self.sync_wait = wait;
        self
    }

    /// How long request handlers wait for a durable write.
    pub fn sync_wait(&self) -> Duration {
        self.sync_wait
    }

    /// Current local view with totals. Never touches the store.
    pub fn snapshot(&self) -> CartSnapshot {
        with_view(&self.view, |view| view.snapshot())
    }

    /// Replaces the local view with the store's contents.
    ///
    /// On failure the local view is left as it was; there is no retry here.
    pub async fn hydrate(&self) -> SyncOutcome {
        match self.store.list_lines().await {
            Ok(records) => {
                let count = records.len();
                with_view(&self.view, |view| view.replace_with(records));
                tracing::info!(records = count, "Cart hydrated from store");
                SyncOutcome::Synced
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cart hydration failed, keeping local view");
                SyncOutcome::Failed(e)
            }
        }
    }

    /// Adds one unit of a product, merging into its existing line.
    pub fn add_or_increment(
        &self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
    ) -> Mutation {
        let name = name.into();
        let (line_id, snapshot) = with_view(&self.view, |view| {
            let id = view.add_or_increment(product_id.clone(), &name, unit_price);
            (id, view.snapshot())
        });
        tracing::debug!(local_id = %line_id, product_id = %product_id, "Line added locally");

        let request = NewLine::single_unit(product_id, name, unit_price);
        let store = Arc::clone(&self.store);
        let view = Arc::clone(&self.view);

        start(snapshot, async move {
            let product_id = request.product_id.clone();
            let units = request.quantity;
            match store.create_line(request).await {
                Ok(record) => {
                    let remote_id = record.id.clone();
                    match with_view(&view, |v| v.apply_created(&record, units)) {
                        Some(local_id) => {
                            tracing::debug!(
                                local_id = %local_id,
                                remote_id = %remote_id,
                                "Add confirmed by store"
                            );
                            SyncOutcome::Synced
                        }
                        None => discard_orphan(store.as_ref(), &product_id, &remote_id).await,
                    }
                }
                Err(e) => {
                    with_view(&view, |v| v.abandon_add(&product_id, units));
                    tracing::warn!(product_id = %product_id, error = %e, "Durable add failed, keeping local line");
                    SyncOutcome::Failed(e)
                }
            }
        })
    }

    /// Removes a line locally and deletes it from the store.
    ///
    /// Lines never confirmed by the store are addressed by their local id;
    /// the resulting `NotFound` counts as already deleted.
    pub fn remove_line(&self, line_id: LineId) -> Result<Mutation, CartError> {
        let (removed, snapshot) = with_view(&self.view, |view| {
            let removed = view.remove(line_id);
            (removed, view.snapshot())
        });
        let removed = removed.ok_or(CartError::LineNotFound(line_id))?;
        let address = removed.store_address();
        let store = Arc::clone(&self.store);

        Ok(start(snapshot, async move {
            match store.delete_line(&address).await {
                Ok(()) => SyncOutcome::Synced,
                Err(CartStoreError::NotFound(_)) => {
                    tracing::debug!(remote_id = %address, "Line already absent from store");
                    SyncOutcome::Synced
                }
                Err(e) => {
                    tracing::warn!(remote_id = %address, error = %e, "Durable delete failed");
                    SyncOutcome::Failed(e)
                }
            }
        }))
    }

    /// Sets a line's quantity. Zero or less removes the line.
    ///
    /// A successful store update overwrites the local quantity with the
    /// store's value.
    pub fn set_quantity(&self, line_id: LineId, quantity: i64) -> Result<Mutation, CartError> {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), quantity)
        })?;

        let (address, snapshot) = with_view(&self.view, |view| {
            let address = view.set_quantity(line_id, quantity).map(|l| l.store_address());
            (address, view.snapshot())
        });
        let address = address.ok_or(CartError::LineNotFound(line_id))?;
        let store = Arc::clone(&self.store);
        let view = Arc::clone(&self.view);

        Ok(start(snapshot, async move {
            match store.update_line_quantity(&address, quantity).await {
                Ok(update) => {
                    if update.quantity != quantity {
                        tracing::info!(
                            local_id = %line_id,
                            requested = quantity,
                            stored = update.quantity,
                            "Store adjusted quantity"
                        );
                    }
                    with_view(&view, |v| v.apply_quantity(line_id, update.id, update.quantity));
                    SyncOutcome::Synced
                }
                Err(e) => {
                    tracing::warn!(local_id = %line_id, error = %e, "Durable quantity update failed, keeping local value");
                    SyncOutcome::Failed(e)
                }
            }
        }))
    }

    /// Empties the local view and deletes every line from the store.
    ///
    /// Store failures do not affect the local result, which is always empty.
    pub fn clear(&self) -> Mutation {
        let (removed, snapshot) = with_view(&self.view, |view| {
            let removed = view.clear();
            (removed, view.snapshot())
        });
        let addresses: Vec<_> = removed.iter().map(|l| l.store_address()).collect();
        let store = Arc::clone(&self.store);

        start(snapshot, async move {
            let attempted = addresses.len();
            let results = join_all(addresses.iter().map(|id| store.delete_line(id))).await;
            let failed = results
                .into_iter()
                .filter(|r| matches!(r, Err(e) if !matches!(e, CartStoreError::NotFound(_))))
                .count();
            if failed == 0 {
                SyncOutcome::Synced
            } else {
                tracing::warn!(attempted, failed, "Some durable deletes failed while clearing cart");
                SyncOutcome::PartiallyFailed { attempted, failed }
            }
        })
    }
}

/// Starts the durable write on its own task.
fn start<F>(view: CartSnapshot, write: F) -> Mutation
where
    F: Future<Output = SyncOutcome> + Send + 'static,
{
    Mutation::new(view, tokio::spawn(write))
}

/// Deletes a record created for a product the user removed while the add
/// was in flight.
async fn discard_orphan(
    store: &dyn CartStore,
    product_id: &ProductId,
    remote_id: &RemoteLineId,
) -> SyncOutcome {
    tracing::debug!(
        product_id = %product_id,
        remote_id = %remote_id,
        "Add confirmed after local removal, deleting record"
    );
    match store.delete_line(remote_id).await {
        Ok(()) | Err(CartStoreError::NotFound(_)) => SyncOutcome::Synced,
        Err(e) => {
            tracing::warn!(remote_id = %remote_id, error = %e, "Could not delete record of removed line");
            SyncOutcome::Failed(e)
        }
    }
}

/// Runs `f` with the view locked. The guard never lives across an await.
fn with_view<R>(view: &Mutex<LocalView>, f: impl FnOnce(&mut LocalView) -> R) -> R {
    let mut guard = view.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
