//! Repository trait for database liveness checks.

use crate::error::AppError;
use async_trait::async_trait;

/// Lightweight database probe used by the health endpoint.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHealthRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Checks that a connection can be obtained and a trivial query runs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
