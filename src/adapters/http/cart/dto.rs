//! Request and response bodies for cart endpoints.

use serde::{Deserialize, Serialize};

use crate::application::cart::{MutationResult, SyncOutcome};
use crate::domain::cart::{CartLine, CartSnapshot};

/// POST /cart
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub name: String,
    pub price: f64,
}

/// PUT /cart/:id
#[derive(Debug, Clone, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().to_string(),
            remote_id: line.remote_id().map(|id| id.to_string()),
            product_id: line.product_id().to_string(),
            name: line.name().to_string(),
            price: line.unit_price().value(),
            quantity: line.quantity(),
            subtotal: line.subtotal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_item_count: u64,
    pub total_price: f64,
}

impl From<&CartSnapshot> for CartResponse {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            lines: snapshot.lines.iter().map(CartLineResponse::from).collect(),
            total_item_count: snapshot.total_item_count,
            total_price: snapshot.total_price,
        }
    }
}

/// Optimistic cart plus how the durable write went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMutationResponse {
    pub cart: CartResponse,
    pub synced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CartMutationResponse {
    pub fn new(view: &CartSnapshot, sync: &SyncOutcome) -> Self {
        Self {
            cart: view.into(),
            synced: sync.is_ok(),
            warning: sync.warning(),
        }
    }
}

impl From<MutationResult> for CartMutationResponse {
    fn from(result: MutationResult) -> Self {
        Self::new(&result.view, &result.sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartStoreError;

    #[test]
    fn add_request_uses_camel_case() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"productId":"d1","name":"Gold Necklace","price":1999}"#)
                .unwrap();
        assert_eq!(req.product_id, "d1");
        assert_eq!(req.price, 1999.0);
    }

    #[test]
    fn failed_sync_carries_warning() {
        let response = CartMutationResponse::new(
            &CartSnapshot::empty(),
            &SyncOutcome::Failed(CartStoreError::unreachable("down")),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["synced"], false);
        assert_eq!(json["warning"], "store unreachable: down");
        assert_eq!(json["cart"]["totalItemCount"], 0);
    }

    #[test]
    fn synced_response_has_no_warning() {
        let response = CartMutationResponse::new(&CartSnapshot::empty(), &SyncOutcome::Synced);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("warning").is_none());
    }
}
