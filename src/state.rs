//! Shared application state injected into handlers.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::application::services::ResourceService;
use crate::domain::entities::{Customer, Product};
use crate::domain::repositories::HealthRepository;
use crate::infrastructure::cache::CacheService;

/// Application state cloned into every request.
///
/// Handlers extract only the part they need through [`FromRef`]: the generic
/// resource handlers take `Arc<ResourceService<R>>`, the health endpoint takes
/// [`HealthProbes`].
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<ResourceService<Customer>>,
    pub products: Arc<ResourceService<Product>>,
    pub health: HealthProbes,
}

/// Dependencies probed by the health endpoint.
#[derive(Clone)]
pub struct HealthProbes {
    pub database: Arc<dyn HealthRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl FromRef<AppState> for Arc<ResourceService<Customer>> {
    fn from_ref(state: &AppState) -> Self {
        state.customers.clone()
    }
}

impl FromRef<AppState> for Arc<ResourceService<Product>> {
    fn from_ref(state: &AppState) -> Self {
        state.products.clone()
    }
}

impl FromRef<AppState> for HealthProbes {
    fn from_ref(state: &AppState) -> Self {
        state.health.clone()
    }
}
