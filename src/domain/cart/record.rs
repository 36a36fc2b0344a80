//! Records exchanged with the durable cart store.
//!
//! These are the store's view of a cart line. They are independent of the
//! engine's local view: the store addresses lines by [`RemoteLineId`], the
//! engine by [`LineId`](crate::domain::foundation::LineId).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Price, ProductId, RemoteLineId, ValidationError};

/// A line as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLine {
    pub id: RemoteLineId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

/// Payload of a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl NewLine {
    /// Payload meaning "add one unit of this product".
    pub fn single_unit(product_id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Field checks every store applies before accepting a create.
    ///
    /// `ProductId` and `Price` are already validated at construction; what is
    /// left is the name and the quantity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        validate_quantity(self.quantity)
    }
}

/// Acknowledgement of a quantity update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub id: RemoteLineId,
    pub quantity: u32,
}

/// Quantities must be positive integers.
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::out_of_range(
            "quantity",
            1,
            i64::from(u32::MAX),
            0,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: u32) -> NewLine {
        NewLine {
            product_id: ProductId::new("p1").unwrap(),
            name: name.to_string(),
            unit_price: Price::try_new(10.0).unwrap(),
            quantity,
        }
    }

    #[test]
    fn single_unit_has_quantity_one() {
        let new = NewLine::single_unit(
            ProductId::new("p1").unwrap(),
            "Ring",
            Price::try_new(5.0).unwrap(),
        );
        assert_eq!(new.quantity, 1);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            line("  ", 1).validate(),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(matches!(
            line("Ring", 0).validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
