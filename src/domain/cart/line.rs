//! CartLine entity.

use serde::Serialize;

use crate::domain::foundation::{LineId, Price, ProductId, RemoteLineId};

/// One product's presence in the local cart view.
///
/// Quantity is always at least 1; a line whose quantity would drop to zero
/// is removed from the view instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    id: LineId,
    remote_id: Option<RemoteLineId>,
    product_id: ProductId,
    name: String,
    unit_price: Price,
    quantity: u32,

    /// Quantity the store last reported for `remote_id`.
    #[serde(skip)]
    remote_quantity: Option<u32>,

    /// Units added locally whose store confirmation has not arrived yet.
    #[serde(skip)]
    pending_adds: u32,
}

impl CartLine {
    /// A freshly added, unconfirmed line holding one unit.
    pub(crate) fn new(product_id: ProductId, name: String, unit_price: Price) -> Self {
        Self {
            id: LineId::new(),
            remote_id: None,
            product_id,
            name,
            unit_price,
            quantity: 1,
            remote_quantity: None,
            pending_adds: 1,
        }
    }

    /// A line rebuilt from a store record.
    pub(crate) fn confirmed(
        remote_id: RemoteLineId,
        product_id: ProductId,
        name: String,
        unit_price: Price,
        quantity: u32,
    ) -> Self {
        Self {
            id: LineId::new(),
            remote_id: Some(remote_id),
            product_id,
            name,
            unit_price,
            quantity,
            remote_quantity: Some(quantity),
            pending_adds: 0,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn remote_id(&self) -> Option<&RemoteLineId> {
        self.remote_id.as_ref()
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price * quantity`.
    pub fn subtotal(&self) -> f64 {
        self.unit_price.times(self.quantity)
    }

    /// Id to address this line at the store, falling back to the local id
    /// when the store never confirmed it.
    pub fn store_address(&self) -> RemoteLineId {
        self.remote_id
            .clone()
            .unwrap_or_else(|| RemoteLineId::fallback_for(self.id))
    }

    pub(crate) fn increment(&mut self, units: u32) {
        self.quantity = self.quantity.saturating_add(units);
    }

    /// One more unit added locally, awaiting its store confirmation.
    pub(crate) fn add_pending_unit(&mut self) {
        self.increment(1);
        self.pending_adds = self.pending_adds.saturating_add(1);
    }

    pub(crate) fn pending_adds(&self) -> u32 {
        self.pending_adds
    }

    /// Stops waiting for `units` add confirmations, whether they landed or
    /// failed.
    pub(crate) fn settle_pending(&mut self, units: u32) {
        self.pending_adds = self.pending_adds.saturating_sub(units);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Binds to a store record with an authoritative quantity.
    pub(crate) fn bind(&mut self, remote_id: RemoteLineId, remote_quantity: u32) {
        self.remote_id = Some(remote_id);
        self.remote_quantity = Some(remote_quantity);
    }

    /// Binds to a record reported by a create. Creates only ever add units,
    /// so an older, lower count never replaces a newer one.
    pub(crate) fn bind_created(&mut self, remote_id: RemoteLineId, remote_quantity: u32) {
        let known = self.known_remote_quantity(&remote_id);
        self.bind(remote_id, known.max(remote_quantity));
    }

    /// Units the store held for `remote_id` as far as this line knows.
    pub(crate) fn known_remote_quantity(&self, remote_id: &RemoteLineId) -> u32 {
        match &self.remote_id {
            Some(bound) if bound == remote_id => self.remote_quantity.unwrap_or(0),
            _ => 0,
        }
    }
}
