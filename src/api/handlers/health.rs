//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::HealthProbes;

/// Cache key read by the cache check.
const CACHE_PROBE_KEY: &str = "health_check";

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// Always **200 OK**. Failing checks are reported in the body and turn the
/// overall `status` into `"degraded"`.
///
/// # Components Checked
///
/// 1. **Database**: Runs `SELECT 1`
/// 2. **Cache**: Reads the `health_check` key
///
/// # Response
///
/// ```json
/// {
///   "status": "degraded",
///   "timestamp": 1760601600.123,
///   "checks": {
///     "database": "ok",
///     "cache": { "status": "error", "error": "Cache operation error: ..." }
///   }
/// }
/// ```
pub async fn health_handler(State(probes): State<HealthProbes>) -> Json<HealthResponse> {
    let database = check_database(&probes).await;
    let cache = check_cache(&probes).await;

    let status = if database.is_ok() && cache.is_ok() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
        checks: HealthChecks { database, cache },
    })
}

async fn check_database(probes: &HealthProbes) -> CheckStatus {
    match probes.database.ping().await {
        Ok(()) => CheckStatus::ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            CheckStatus::failed(e)
        }
    }
}

async fn check_cache(probes: &HealthProbes) -> CheckStatus {
    match probes.cache.get(CACHE_PROBE_KEY).await {
        Ok(_) => CheckStatus::ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Cache health check failed");
            CheckStatus::failed(e)
        }
    }
}
