//! API route configuration.

use crate::api::handlers::{create_handler, list_handler, update_handler};
use crate::domain::entities::{Customer, Product};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Resource routes.
///
/// # Endpoints
///
/// - `GET  /customers` - Paginated customer list (`page`, `per_page`)
/// - `POST /customers` - Create a customer
/// - `PUT  /customers` - Update a customer (`id` in body)
/// - `GET  /products`  - Paginated product list (`page`, `per_page`)
/// - `POST /products`  - Create a product
/// - `PUT  /products`  - Update a product (`id` in body)
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(list_handler::<Customer>)
                .post(create_handler::<Customer>)
                .put(update_handler::<Customer>),
        )
        .route(
            "/products",
            get(list_handler::<Product>)
                .post(create_handler::<Product>)
                .put(update_handler::<Product>),
        )
}
