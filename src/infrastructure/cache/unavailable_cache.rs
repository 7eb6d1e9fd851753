//! Cache stand-in for a configured backend that could not be reached.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;

/// A cache whose every lookup fails with the connection error seen at startup.
///
/// Installed when `REDIS_URL` is set but Redis is down, so the health
/// endpoint reports the cache as failing instead of healthy.
pub struct UnavailableCache {
    reason: String,
}

impl UnavailableCache {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CacheService for UnavailableCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError(self.reason.clone()))
    }
}
