//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::resource_service::ResourceService`] - Create, update and paginated listing for any [`crate::domain::entities::Resource`]

pub mod services;
