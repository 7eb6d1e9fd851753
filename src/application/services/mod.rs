//! Business logic services for the application layer.

pub mod resource_service;

pub use resource_service::ResourceService;
