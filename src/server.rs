//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, state wiring and the Axum
//! server lifecycle.

use crate::application::services::ResourceService;
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache, UnavailableCache};
use crate::infrastructure::persistence::{
    PgCustomerRepository, PgHealthRepository, PgProductRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, HealthProbes};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable within the connect timeout.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Connects the cache backend.
///
/// Without `REDIS_URL` caching is disabled ([`NullCache`]). A configured but
/// unreachable Redis does not prevent startup: it is replaced by an
/// [`UnavailableCache`] so the health endpoint keeps reporting the failure.
pub async fn connect_cache(redis_url: Option<&str>) -> Arc<dyn CacheService> {
    match redis_url {
        Some(redis_url) => match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Cache marked unavailable.", e);
                Arc::new(UnavailableCache::new(e.to_string()))
            }
        },
        None => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

/// Wires repositories and services into the shared [`AppState`].
pub fn build_state(pool: Arc<PgPool>, cache: Arc<dyn CacheService>) -> AppState {
    let customers = Arc::new(ResourceService::new(Arc::new(PgCustomerRepository::new(
        pool.clone(),
    ))));
    let products = Arc::new(ResourceService::new(Arc::new(PgProductRepository::new(
        pool.clone(),
    ))));

    AppState {
        customers,
        products,
        health: HealthProbes {
            database: Arc::new(PgHealthRepository::new(pool)),
            cache,
        },
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let cache = connect_cache(config.redis_url.as_deref()).await;
    let state = build_state(Arc::new(pool), cache);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
