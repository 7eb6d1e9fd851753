//! Repository trait definitions for data access abstraction.
//!
//! Implementations live in [`crate::infrastructure::persistence`].

pub mod health_repository;
pub mod resource_repository;

pub use health_repository::HealthRepository;
pub use resource_repository::ResourceRepository;

#[cfg(test)]
pub use health_repository::MockHealthRepository;
