//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Customer`] - A customer record with unique email, phone and code
//! - [`Product`] - A catalog product with unique name and code
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewCustomer`, `NewProduct` - For creating new records
//! - `CustomerPatch`, `ProductPatch` - For partial updates
//!
//! Each entity implements [`Resource`], which ties it to its creation and
//! update types and describes its storage table and unique fields.

pub mod customer;
pub mod product;
pub mod resource;

pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use product::{NewProduct, Product, ProductPatch};
pub use resource::Resource;
