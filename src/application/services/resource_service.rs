//! Generic record management service.

use crate::api::dto::pagination::{PageInfo, PaginationParams};
use crate::domain::entities::Resource;
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;
use std::sync::Arc;

/// Service managing records of one [`Resource`] type.
///
/// Thin orchestration over a [`ResourceRepository`]: handlers decide how
/// failures are presented, this layer only logs and delegates.
pub struct ResourceService<R: Resource> {
    repository: Arc<dyn ResourceRepository<R>>,
}

impl<R: Resource> ResourceService<R> {
    /// Creates a new service backed by `repository`.
    pub fn new(repository: Arc<dyn ResourceRepository<R>>) -> Self {
        Self { repository }
    }

    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] on uniqueness conflicts.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, new: R::New) -> Result<R, AppError> {
        let created = self.repository.create(new).await?;
        tracing::info!(entity = R::VERBOSE_NAME, id = created.id(), "Record created");
        Ok(created)
    }

    /// Looks up a record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get(&self, id: i64) -> Result<R, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} not found", R::VERBOSE_NAME)))
    }

    /// Applies a partial update to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Integrity`] on uniqueness conflicts.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, id: i64, patch: R::Patch) -> Result<R, AppError> {
        let updated = self.repository.update(id, patch).await?;
        tracing::info!(entity = R::VERBOSE_NAME, id, "Record updated");
        Ok(updated)
    }

    /// Returns one page of records, ordered by ID.
    ///
    /// Out-of-range pages resolve to the last page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, params: &PaginationParams) -> Result<(Vec<R>, PageInfo), AppError> {
        let total = self.repository.count().await?;
        let page_info = PageInfo::new(total, params);
        let items = self
            .repository
            .list(page_info.offset(), page_info.per_page)
            .await?;

        Ok((items, page_info))
    }
}
