//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every check passes, `"degraded"` otherwise.
    pub status: &'static str,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub checks: HealthChecks,
}

/// Result of each individual check.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub cache: CheckStatus,
}

/// Outcome of one check: the string `"ok"`, or an error object.
///
/// ```json
/// "ok"
/// {"status": "error", "error": "connection refused"}
/// ```
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckStatus {
    Ok(&'static str),
    Failed { status: &'static str, error: String },
}

impl CheckStatus {
    pub fn ok() -> Self {
        Self::Ok("ok")
    }

    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Failed {
            status: "error",
            error: error.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}
