//! PostgreSQL implementation of the customer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Customer, CustomerPatch, NewCustomer};
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;

/// PostgreSQL repository for customers.
///
/// Uniqueness of `email`, `phone` and `code` is enforced by the schema;
/// violations surface as [`AppError::Integrity`].
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    code: String,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            id: r.id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            code: r.code,
            address: r.address,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, email, phone, code, address, created_at, updated_at";

#[async_trait]
impl ResourceRepository<Customer> for PgCustomerRepository {
    async fn create(&self, new: NewCustomer) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            INSERT INTO customers (name, email, phone, code, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.code)
        .bind(new.address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn update(&self, id: i64, patch: CustomerPatch) -> Result<Customer, AppError> {
        let update_phone = patch.phone.is_some();
        let update_address = patch.address.is_some();

        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            UPDATE customers SET
                name       = COALESCE($2::TEXT, name),
                email      = COALESCE($3::TEXT, email),
                phone      = CASE WHEN $4 THEN $5::TEXT ELSE phone END,
                code       = COALESCE($6::TEXT, code),
                address    = CASE WHEN $7 THEN $8::TEXT ELSE address END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(update_phone)
        .bind(patch.phone.flatten())
        .bind(patch.code)
        .bind(update_address)
        .bind(patch.address.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Customer::from)
            .ok_or_else(|| AppError::not_found("Customer not found"))
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }
}
