//! The local cart view and its merge rules.
//!
//! `LocalView` is plain synchronous state. Every method either applies an
//! optimistic user mutation or folds a store confirmation back in; none of
//! them perform I/O. Identity for merging is always the product id.

use serde::Serialize;

use super::line::CartLine;
use super::record::StoredLine;
use crate::domain::foundation::{LineId, Price, ProductId, RemoteLineId};

/// In-memory cart state that drives what the user sees.
#[derive(Debug, Clone, Default)]
pub struct LocalView {
    lines: Vec<CartLine>,
}

/// Point-in-time copy of the local view with derived totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total_item_count: u64,
    pub total_price: f64,
}

impl CartSnapshot {
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total_item_count: 0,
            total_price: 0.0,
        }
    }

    pub fn line_for(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }
}

impl LocalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn line_for(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Increments the line for `product_id`, creating it when absent.
    ///
    /// Returns the id of the affected line.
    pub fn add_or_increment(&mut self, product_id: ProductId, name: &str, unit_price: Price) -> LineId {
        if let Some(line) = self.lines.iter_mut().find(|l| *l.product_id() == product_id) {
            line.add_pending_unit();
            return line.id();
        }
        let line = CartLine::new(product_id, name.to_string(), unit_price);
        let id = line.id();
        self.lines.push(line);
        id
    }

    /// Removes and returns the line.
    pub fn remove(&mut self, id: LineId) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| l.id() == id)?;
        Some(self.lines.remove(pos))
    }

    /// Sets a positive quantity. Returns the updated line, or `None` when the
    /// line is unknown.
    pub fn set_quantity(&mut self, id: LineId, quantity: u32) -> Option<&CartLine> {
        debug_assert!(quantity > 0, "zero quantities are removals");
        let line = self.lines.iter_mut().find(|l| l.id() == id)?;
        line.set_quantity(quantity);
        Some(line)
    }

    /// Drops every line, returning what was removed.
    pub fn clear(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Replaces the whole view with store records.
    ///
    /// Records sharing a product id collapse into one line whose quantity is
    /// the sum; the first record's id is the one bound.
    pub fn replace_with(&mut self, records: Vec<StoredLine>) {
        let mut lines: Vec<CartLine> = Vec::with_capacity(records.len());
        for record in records {
            if let Some(existing) = lines.iter_mut().find(|l| *l.product_id() == record.product_id) {
                existing.increment(record.quantity);
                continue;
            }
            lines.push(CartLine::confirmed(
                record.id,
                record.product_id,
                record.name,
                record.unit_price,
                record.quantity,
            ));
        }
        self.lines = lines;
    }

    /// Folds a successful create back into the view.
    ///
    /// `units_written` is what the request asked the store to add. The store
    /// count is compared against what this line already knew plus every add
    /// still awaiting confirmation, so confirmations may arrive in any order.
    /// Only units beyond that came from elsewhere (another session) and are
    /// summed into the local quantity. The returned remote id is adopted.
    ///
    /// Returns `None` when the product is no longer in the view; removals
    /// are never undone by a late confirmation.
    pub fn apply_created(&mut self, record: &StoredLine, units_written: u32) -> Option<LineId> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| *l.product_id() == record.product_id)?;
        let expected = line
            .known_remote_quantity(&record.id)
            .saturating_add(line.pending_adds());
        let unseen = record.quantity.saturating_sub(expected);
        if unseen > 0 {
            line.increment(unseen);
        }
        line.settle_pending(units_written);
        line.bind_created(record.id.clone(), record.quantity);
        Some(line.id())
    }

    /// Records that an add for `product_id` failed at the store. The local
    /// units stay; they are just no longer awaited.
    pub fn abandon_add(&mut self, product_id: &ProductId, units: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id() == product_id) {
            line.settle_pending(units);
        }
    }

    /// Overwrites a line's quantity with the store's authoritative value.
    ///
    /// Returns `false` when the line is gone. A zero from the store removes
    /// the line.
    pub fn apply_quantity(&mut self, id: LineId, remote_id: RemoteLineId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id).is_some();
        }
        match self.lines.iter_mut().find(|l| l.id() == id) {
            Some(line) => {
                line.set_quantity(quantity);
                line.bind(remote_id, quantity);
                true
            }
            None => false,
        }
    }

    /// Copy of the view with totals.
    pub fn snapshot(&self) -> CartSnapshot {
        let total_item_count = self.lines.iter().map(|l| u64::from(l.quantity())).sum();
        let total_price = self.lines.iter().map(CartLine::subtotal).sum();
        CartSnapshot {
            lines: self.lines.clone(),
            total_item_count,
            total_price,
        }
    }
}
