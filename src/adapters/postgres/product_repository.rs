//! PostgreSQL implementation of ProductRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ErrorCode, Price, ProductId, Timestamp};
use crate::ports::ProductRepository;

/// PostgreSQL implementation of ProductRepository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, image, created_at, updated_at
            FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list products", e))?;

        rows.into_iter().map(row_to_product).collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, image, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch product", e))?;

        row.map(row_to_product).transpose()
    }

    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id().as_str())
        .bind(product.name())
        .bind(product.price().value())
        .bind(product.image())
        .bind(product.created_at().as_datetime())
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert product", e))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                price = $3,
                image = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_str())
        .bind(product.name())
        .bind(product.price().value())
        .bind(product.image())
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update product", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", product.id()),
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_product(row: sqlx::postgres::PgRow) -> Result<Product, DomainError> {
    let column = |name: &str, e: sqlx::Error| db_error(&format!("get {}", name), e);

    let id: String = row.try_get("id").map_err(|e| column("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column("name", e))?;
    let price: f64 = row.try_get("price").map_err(|e| column("price", e))?;
    let image: String = row.try_get("image").map_err(|e| column("image", e))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| column("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> =
        row.try_get("updated_at").map_err(|e| column("updated_at", e))?;

    Ok(Product::reconstitute(
        ProductId::new(id)?,
        name,
        Price::try_new(price)?,
        image,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
