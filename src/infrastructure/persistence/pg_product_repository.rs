//! PostgreSQL implementation of the product repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;

/// PostgreSQL repository for products.
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    code: String,
    description: Option<String>,
    price_cents: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            code: r.code,
            description: r.description,
            price_cents: r.price_cents,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, code, description, price_cents, created_at, updated_at";

#[async_trait]
impl ResourceRepository<Product> for PgProductRepository {
    async fn create(&self, new: NewProduct) -> Result<Product, AppError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, code, description, price_cents)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.name)
        .bind(new.code)
        .bind(new.description)
        .bind(new.price_cents)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product, AppError> {
        let update_description = patch.description.is_some();

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name        = COALESCE($2::TEXT, name),
                code        = COALESCE($3::TEXT, code),
                description = CASE WHEN $4 THEN $5::TEXT ELSE description END,
                price_cents = COALESCE($6::BIGINT, price_cents),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.code)
        .bind(update_description)
        .bind(patch.description.flatten())
        .bind(patch.price_cents)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Product::from)
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
