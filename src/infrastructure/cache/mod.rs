//! Cache backends probed by the health endpoint.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation when no Redis is configured
//! - [`UnavailableCache`] - Configured Redis that could not be reached

mod null_cache;
mod redis_cache;
mod service;
mod unavailable_cache;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
pub use unavailable_cache::UnavailableCache;
