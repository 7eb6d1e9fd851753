//! HTTP request handlers for API endpoints.
//!
//! - [`resource`] - Generic create / update / list handlers shared by all resources
//! - [`health`] - Service health check

pub mod health;
pub mod resource;

pub use health::health_handler;
pub use resource::{ResourceApi, create_handler, list_handler, update_handler, validate_request};
