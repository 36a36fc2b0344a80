//! PostgreSQL implementation of CartStore.
//!
//! One row per product. Creating a line for a product that already has a
//! row adds to its quantity.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::errors::store_error;
use crate::domain::cart::{CartStoreError, NewLine, QuantityUpdate, StoredLine};
use crate::domain::foundation::{Price, ProductId, RemoteLineId};
use crate::ports::CartStore;

/// PostgreSQL implementation of CartStore.
#[derive(Clone)]
pub struct PostgresCartStore {
    pool: PgPool,
}

impl PostgresCartStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for PostgresCartStore {
    async fn list_lines(&self) -> Result<Vec<StoredLine>, CartStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, name, price, quantity
            FROM cart_items
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(row_to_line).collect()
    }

    async fn create_line(&self, line: NewLine) -> Result<StoredLine, CartStoreError> {
        line.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO cart_items (product_id, name, price, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (product_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity,
                updated_at = now()
            RETURNING id, product_id, name, price, quantity
            "#,
        )
        .bind(line.product_id.as_str())
        .bind(line.name.trim())
        .bind(line.unit_price.value())
        .bind(to_db_quantity(line.quantity)?)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row_to_line(row)
    }

    async fn update_line_quantity(
        &self,
        id: &RemoteLineId,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartStoreError> {
        if quantity == 0 {
            return Err(CartStoreError::validation("quantity must be at least 1"));
        }
        let db_id = parse_id(id)?;

        let row = sqlx::query(
            r#"
            UPDATE cart_items SET quantity = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, quantity
            "#,
        )
        .bind(db_id)
        .bind(to_db_quantity(quantity)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .ok_or_else(|| CartStoreError::not_found(id.as_str()))?;

        let quantity: i32 = row.try_get("quantity").map_err(store_error)?;
        Ok(QuantityUpdate {
            id: id.clone(),
            quantity: from_db_quantity(quantity)?,
        })
    }

    async fn delete_line(&self, id: &RemoteLineId) -> Result<(), CartStoreError> {
        let db_id = parse_id(id)?;

        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(db_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(CartStoreError::not_found(id.as_str()));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Ids this store never issued (local fallbacks) cannot match a row.
fn parse_id(id: &RemoteLineId) -> Result<i64, CartStoreError> {
    id.as_str()
        .parse()
        .map_err(|_| CartStoreError::not_found(id.as_str()))
}

fn to_db_quantity(quantity: u32) -> Result<i32, CartStoreError> {
    i32::try_from(quantity).map_err(|_| CartStoreError::validation("quantity is too large"))
}

fn from_db_quantity(quantity: i32) -> Result<u32, CartStoreError> {
    u32::try_from(quantity).map_err(|_| CartStoreError::validation("stored quantity is negative"))
}

fn row_to_line(row: sqlx::postgres::PgRow) -> Result<StoredLine, CartStoreError> {
    let id: i64 = row.try_get("id").map_err(store_error)?;
    let product_id: String = row.try_get("product_id").map_err(store_error)?;
    let name: String = row.try_get("name").map_err(store_error)?;
    let price: f64 = row.try_get("price").map_err(store_error)?;
    let quantity: i32 = row.try_get("quantity").map_err(store_error)?;

    Ok(StoredLine {
        id: RemoteLineId::from_number(id),
        product_id: ProductId::new(product_id)?,
        name,
        unit_price: Price::try_new(price)?,
        quantity: from_db_quantity(quantity)?,
    })
}
