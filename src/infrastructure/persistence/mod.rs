//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgCustomerRepository`] - Customer storage
//! - [`PgProductRepository`] - Product storage
//! - [`PgHealthRepository`] - Database liveness probe

pub mod pg_customer_repository;
pub mod pg_health_repository;
pub mod pg_product_repository;

pub use pg_customer_repository::PgCustomerRepository;
pub use pg_health_repository::PgHealthRepository;
pub use pg_product_repository::PgProductRepository;
