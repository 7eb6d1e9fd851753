//! Generic repository trait for resources exposed through the API.

use crate::domain::entities::Resource;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for creating, updating and listing records of `R`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCustomerRepository`]
/// - [`crate::infrastructure::persistence::PgProductRepository`]
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] if a unique constraint is violated.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new: R::New) -> Result<R, AppError>;

    /// Finds a record by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<R>, AppError>;

    /// Applies a partial update to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Integrity`] if a unique constraint is violated.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: R::Patch) -> Result<R, AppError>;

    /// Counts all records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<u64, AppError>;

    /// Lists records ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<R>, AppError>;
}
