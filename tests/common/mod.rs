#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use records_api::application::services::ResourceService;
use records_api::domain::entities::{
    Customer, CustomerPatch, NewCustomer, NewProduct, Product, ProductPatch, Resource,
};
use records_api::domain::repositories::{HealthRepository, ResourceRepository};
use records_api::error::AppError;
use records_api::infrastructure::cache::{CacheService, NullCache};
use records_api::state::{AppState, HealthProbes};
use records_api::utils::db_error::IntegrityViolation;
use std::sync::{Arc, Mutex};

/// Entities the in-memory repository can store.
pub trait MemoryRecord: Resource {
    fn build(id: i64, new: Self::New) -> Self;
    fn patch(&mut self, patch: Self::Patch);
    /// Values of the uniquely constrained columns.
    fn unique_values(&self) -> Vec<(&'static str, String)>;
}

impl MemoryRecord for Customer {
    fn build(id: i64, new: NewCustomer) -> Self {
        Customer {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            code: new.code,
            address: new.address,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn patch(&mut self, patch: CustomerPatch) {
        self.apply(patch);
    }

    fn unique_values(&self) -> Vec<(&'static str, String)> {
        let mut values = vec![("email", self.email.clone()), ("code", self.code.clone())];
        if let Some(phone) = &self.phone {
            values.push(("phone", phone.clone()));
        }
        values
    }
}

impl MemoryRecord for Product {
    fn build(id: i64, new: NewProduct) -> Self {
        Product {
            id,
            name: new.name,
            code: new.code,
            description: new.description,
            price_cents: new.price_cents,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn patch(&mut self, patch: ProductPatch) {
        self.apply(patch);
    }

    fn unique_values(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("code", self.code.clone())]
    }
}

/// Repository backed by a `Vec`, rejecting duplicates the way PostgreSQL does.
pub struct MemoryRepository<R> {
    records: Mutex<Vec<R>>,
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<R: MemoryRecord> MemoryRepository<R> {
    fn check_unique(records: &[R], candidate: &R) -> Result<(), AppError> {
        for existing in records.iter().filter(|r| r.id() != candidate.id()) {
            for ((column, value), (_, other)) in candidate
                .unique_values()
                .into_iter()
                .zip(existing.unique_values())
            {
                if value == other {
                    let constraint = format!("{}_{}_key", R::TABLE, column);
                    return Err(AppError::Integrity(IntegrityViolation {
                        table: Some(R::TABLE.to_string()),
                        message: format!(
                            "duplicate key value violates unique constraint \"{constraint}\""
                        ),
                        constraint: Some(constraint),
                    }));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R: MemoryRecord> ResourceRepository<R> for MemoryRepository<R> {
    async fn create(&self, new: R::New) -> Result<R, AppError> {
        let mut records = self.records.lock().unwrap();
        let record = R::build(records.len() as i64 + 1, new);
        Self::check_unique(&records, &record)?;
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn update(&self, id: i64, patch: R::Patch) -> Result<R, AppError> {
        let mut records = self.records.lock().unwrap();
        let idx = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found("Record not found"))?;

        let mut updated = records[idx].clone();
        updated.patch(patch);
        Self::check_unique(&records, &updated)?;
        records[idx] = updated.clone();
        Ok(updated)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<R>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Database probe with a fixed outcome.
pub struct StubDatabase {
    pub healthy: bool,
}

#[async_trait]
impl HealthRepository for StubDatabase {
    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

pub fn create_state_with(database: Arc<dyn HealthRepository>, cache: Arc<dyn CacheService>) -> AppState {
    AppState {
        customers: Arc::new(ResourceService::new(Arc::new(
            MemoryRepository::<Customer>::default(),
        ))),
        products: Arc::new(ResourceService::new(Arc::new(
            MemoryRepository::<Product>::default(),
        ))),
        health: HealthProbes { database, cache },
    }
}

pub fn create_test_state() -> AppState {
    create_state_with(
        Arc::new(StubDatabase { healthy: true }),
        Arc::new(NullCache::new()),
    )
}
