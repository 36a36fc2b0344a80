//! Property tests for the cart reconciliation engine.
//!
//! Each case drives the engine against the in-memory store, toggling store
//! availability between operations to simulate outages.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;
use tokio::sync::oneshot;

use catalog_cart::adapters::InMemoryCartStore;
use catalog_cart::application::{CartEngine, Mutation};
use catalog_cart::domain::cart::{CartSnapshot, CartStoreError, NewLine, QuantityUpdate, StoredLine};
use catalog_cart::domain::foundation::{Price, ProductId, RemoteLineId};
use catalog_cart::ports::CartStore;

#[derive(Debug, Clone)]
enum Op {
    Add { product: usize },
    SetQuantity { product: usize, quantity: i64 },
    Remove { product: usize },
    Clear,
}

const PRODUCTS: [(&str, f64); 3] = [("p1", 100.0), ("p2", 19.99), ("p3", 0.0)];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..PRODUCTS.len()).prop_map(|product| Op::Add { product }),
        2 => (0..PRODUCTS.len(), -2i64..8).prop_map(|(product, quantity)| Op::SetQuantity { product, quantity }),
        1 => (0..PRODUCTS.len()).prop_map(|product| Op::Remove { product }),
        1 => Just(Op::Clear),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn product(index: usize) -> (ProductId, Price) {
    let (id, price) = PRODUCTS[index];
    (ProductId::new(id).unwrap(), Price::try_new(price).unwrap())
}

/// Applies `op` locally; returns the pending durable write, if any.
fn apply(engine: &CartEngine, op: &Op) -> Option<Mutation> {
    match op {
        Op::Add { product: index } => {
            let (id, price) = product(*index);
            Some(engine.add_or_increment(id, "Item", price))
        }
        Op::SetQuantity { product: index, quantity } => {
            let (id, _) = product(*index);
            let line = engine.snapshot().line_for(&id)?.id();
            engine.set_quantity(line, *quantity).ok()
        }
        Op::Remove { product: index } => {
            let (id, _) = product(*index);
            let line = engine.snapshot().line_for(&id)?.id();
            engine.remove_line(line).ok()
        }
        Op::Clear => Some(engine.clear()),
    }
}

/// Writes through to the in-memory store at once, then holds each create's
/// answer until the test releases it.
struct GatedStore {
    inner: Arc<InMemoryCartStore>,
    held: Mutex<Vec<Option<oneshot::Sender<()>>>>,
}

impl GatedStore {
    fn new(inner: Arc<InMemoryCartStore>) -> Self {
        Self {
            inner,
            held: Mutex::new(Vec::new()),
        }
    }

    async fn wait_for_held(&self, count: usize) {
        while self.held.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }

    fn release(&self, index: usize) {
        if let Some(tx) = self.held.lock().unwrap()[index].take() {
            let _ = tx.send(());
        }
    }
}

#[async_trait]
impl CartStore for GatedStore {
    async fn list_lines(&self) -> Result<Vec<StoredLine>, CartStoreError> {
        self.inner.list_lines().await
    }

    async fn create_line(&self, line: NewLine) -> Result<StoredLine, CartStoreError> {
        let result = self.inner.create_line(line).await;
        let (tx, rx) = oneshot::channel();
        self.held.lock().unwrap().push(Some(tx));
        let _ = rx.await;
        result
    }

    async fn update_line_quantity(
        &self,
        id: &RemoteLineId,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartStoreError> {
        self.inner.update_line_quantity(id, quantity).await
    }

    async fn delete_line(&self, id: &RemoteLineId) -> Result<(), CartStoreError> {
        self.inner.delete_line(id).await
    }
}

fn release_order() -> impl Strategy<Value = Vec<usize>> {
    (2usize..8).prop_flat_map(|count| Just((0..count).collect::<Vec<_>>()).prop_shuffle())
}

fn assert_totals_consistent(snapshot: &CartSnapshot) {
    let expected_price: f64 = snapshot
        .lines
        .iter()
        .map(|l| l.unit_price().value() * f64::from(l.quantity()))
        .sum();
    let expected_count: u64 = snapshot.lines.iter().map(|l| u64::from(l.quantity())).sum();
    assert!((snapshot.total_price - expected_price).abs() < 1e-6);
    assert_eq!(snapshot.total_item_count, expected_count);
}

proptest! {
    #[test]
    fn repeated_adds_count_every_call(availability in proptest::collection::vec(any::<bool>(), 1..20)) {
        runtime().block_on(async {
            let store = Arc::new(InMemoryCartStore::new());
            let engine = CartEngine::new(store.clone() as Arc<dyn CartStore>);
            let (id, price) = product(0);

            for available in &availability {
                store.set_available(*available);
                engine.add_or_increment(id.clone(), "Ring", price).settle().await;
            }

            let snapshot = engine.snapshot();
            assert_eq!(snapshot.lines.len(), 1);
            assert_eq!(snapshot.lines[0].quantity() as usize, availability.len());
        });
    }

    #[test]
    fn adds_confirmed_in_any_order_count_every_call(order in release_order()) {
        runtime().block_on(async {
            let memory = Arc::new(InMemoryCartStore::new());
            let store = Arc::new(GatedStore::new(memory.clone()));
            let engine = CartEngine::new(store.clone() as Arc<dyn CartStore>);
            let (id, price) = product(1);

            let mut pending: Vec<Option<Mutation>> = (0..order.len())
                .map(|_| Some(engine.add_or_increment(id.clone(), "Pin", price)))
                .collect();
            store.wait_for_held(order.len()).await;

            for index in &order {
                store.release(*index);
                if let Some(mutation) = pending[*index].take() {
                    assert!(mutation.settle().await.sync.is_ok());
                }
                assert!(engine.snapshot().total_item_count as usize <= order.len());
            }

            assert_eq!(engine.snapshot().total_item_count as usize, order.len());
            assert_eq!(memory.lines()[0].quantity as usize, order.len());
        });
    }

    #[test]
    fn totals_match_lines_for_any_operation_sequence(
        ops in proptest::collection::vec((op(), any::<bool>()), 0..30)
    ) {
        runtime().block_on(async {
            let store = Arc::new(InMemoryCartStore::new());
            let engine = CartEngine::new(store.clone() as Arc<dyn CartStore>);

            for (op, available) in &ops {
                store.set_available(*available);
                if let Some(mutation) = apply(&engine, op) {
                    let result = mutation.settle().await;
                    assert_totals_consistent(&result.view);
                }
                assert_totals_consistent(&engine.snapshot());
            }
        });
    }

    #[test]
    fn non_positive_quantity_equals_removal(quantity in -5i64..=0, available in any::<bool>()) {
        runtime().block_on(async {
            let by_set = {
                let store = Arc::new(InMemoryCartStore::new());
                store.set_available(available);
                let engine = CartEngine::new(store as Arc<dyn CartStore>);
                let (id, price) = product(0);
                let line = engine.add_or_increment(id, "Ring", price).settle().await.view.lines[0].id();
                engine.set_quantity(line, quantity).unwrap().settle().await.view
            };
            let by_remove = {
                let store = Arc::new(InMemoryCartStore::new());
                store.set_available(available);
                let engine = CartEngine::new(store as Arc<dyn CartStore>);
                let (id, price) = product(0);
                let line = engine.add_or_increment(id, "Ring", price).settle().await.view.lines[0].id();
                engine.remove_line(line).unwrap().settle().await.view
            };

            assert_eq!(by_set, by_remove);
            assert_eq!(by_set, CartSnapshot::empty());
        });
    }
}

#[tokio::test]
async fn offline_and_online_runs_reach_the_same_snapshot() {
    async fn run(available: bool) -> CartSnapshot {
        let store = Arc::new(InMemoryCartStore::new());
        store.set_available(available);
        let engine = CartEngine::new(store as Arc<dyn CartStore>);
        let (id, price) = product(0);

        engine.add_or_increment(id.clone(), "Ring", price).settle().await;
        engine.add_or_increment(id.clone(), "Ring", price).settle().await;
        let line = engine.snapshot().line_for(&id).unwrap().id();
        engine.set_quantity(line, 5).unwrap().settle().await;
        engine.snapshot()
    }

    let offline = run(false).await;
    let online = run(true).await;

    assert_eq!(offline.lines.len(), 1);
    assert_eq!(offline.total_item_count, 5);
    assert_eq!(offline.total_price, 500.0);
    assert_eq!(online.total_item_count, offline.total_item_count);
    assert_eq!(online.total_price, offline.total_price);
}

#[tokio::test]
async fn removing_never_confirmed_line_is_tolerated() {
    let store = Arc::new(InMemoryCartStore::new());
    let engine = CartEngine::new(store.clone() as Arc<dyn CartStore>);
    let (id, price) = product(2);

    // Removed before the add answered, so the line is still unbound.
    let line = engine.add_or_increment(id, "Free Sample", price).view().lines[0].id();
    let result = engine.remove_line(line).unwrap().settle().await;

    assert!(result.sync.is_ok());
    assert!(result.view.lines.is_empty());
    assert!(store.lines().is_empty());
}

#[tokio::test]
async fn add_answered_after_removal_leaves_no_record_behind() {
    let memory = Arc::new(InMemoryCartStore::new());
    let store = Arc::new(GatedStore::new(memory.clone()));
    let engine = CartEngine::new(store.clone() as Arc<dyn CartStore>);
    let (id, price) = product(0);

    let add = engine.add_or_increment(id.clone(), "Ring", price);
    store.wait_for_held(1).await;
    let line = add.view().lines[0].id();
    assert!(engine.remove_line(line).unwrap().settle().await.sync.is_ok());
    assert_eq!(memory.lines().len(), 1);

    store.release(0);
    add.settle().await;

    assert!(memory.lines().is_empty());
    engine.hydrate().await;
    assert!(engine.snapshot().line_for(&id).is_none());
}

#[tokio::test]
async fn hydrate_collects_lines_written_by_another_session() {
    let store = Arc::new(InMemoryCartStore::new());
    let (id, price) = product(0);
    store.insert(id.clone(), "Ring", price, 3);

    let engine = CartEngine::new(store.clone() as Arc<dyn CartStore>);
    assert!(engine.hydrate().await.is_ok());
    engine.add_or_increment(id.clone(), "Ring", price).settle().await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.line_for(&id).unwrap().quantity(), 4);
    assert_eq!(store.lines()[0].quantity, 4);
}
