//! Product entity.

use serde::Serialize;

use super::errors::ProductError;
use crate::domain::foundation::{Price, ProductId, Timestamp};

/// A catalog entry sellers manage and buyers add to their cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    image: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl Product {
    /// Creates a new product with a trimmed, non-empty name.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        image: Option<String>,
    ) -> Result<Self, ProductError> {
        let name = validate_name(name.into())?;
        let price = validate_price(price)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            price,
            image: image.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a product from persistence without re-validating.
    pub fn reconstitute(
        id: ProductId,
        name: String,
        price: Price,
        image: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            price,
            image,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Applies a partial update. Nothing changes if any supplied field is
    /// invalid.
    pub fn apply(&mut self, changes: ProductChanges) -> Result<(), ProductError> {
        let name = changes.name.map(validate_name).transpose()?;
        let price = changes.price.map(validate_price).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn validate_name(name: String) -> Result<String, ProductError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProductError::validation("name", "name is required"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> Result<Price, ProductError> {
    Price::try_new(price).map_err(|e| ProductError::validation("price", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn necklace() -> Product {
        Product::new(ProductId::generate(), "  Gold Necklace ", 1999.0, None).unwrap()
    }

    #[test]
    fn new_trims_name_and_defaults_image() {
        let product = necklace();
        assert_eq!(product.name(), "Gold Necklace");
        assert_eq!(product.image(), "");
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = Product::new(ProductId::generate(), " ", 10.0, None);
        assert!(matches!(result, Err(ProductError::ValidationFailed { .. })));
    }

    #[test]
    fn new_rejects_nan_price() {
        let result = Product::new(ProductId::generate(), "Ring", f64::NAN, None);
        assert!(result.is_err());
    }

    #[test]
    fn apply_updates_only_supplied_fields() {
        let mut product = necklace();
        product
            .apply(ProductChanges {
                price: Some(2500.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.price().value(), 2500.0);
        assert_eq!(product.name(), "Gold Necklace");
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut product = necklace();
        let result = product.apply(ProductChanges {
            name: Some("Platinum Necklace".to_string()),
            price: Some(-1.0),
            image: None,
        });
        assert!(result.is_err());
        assert_eq!(product.name(), "Gold Necklace");
    }
}
