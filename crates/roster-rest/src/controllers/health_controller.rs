//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use roster_core::HealthStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Outcome of one dependency probe.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckResult {
    pub name: String,
    /// `healthy`, `degraded` or `unhealthy`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`.
    pub status: String,
    pub checks: Vec<CheckResult>,
}

impl From<(&str, HealthStatus)> for CheckResult {
    fn from((name, status): (&str, HealthStatus)) -> Self {
        let (status, message) = match status {
            HealthStatus::Healthy => ("healthy", None),
            HealthStatus::Degraded(message) => ("degraded", Some(message)),
            HealthStatus::Unhealthy(message) => ("unhealthy", Some(message)),
        };
        Self {
            name: name.to_string(),
            status: status.to_string(),
            message,
        }
    }
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint.
///
/// Runs every registered dependency probe; a degraded dependency still
/// counts as ready.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "A dependency is unhealthy", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut ready = true;
    let mut checks = Vec::with_capacity(state.health_checks.len());

    for check in state.health_checks.iter() {
        let status = check.check().await;
        ready &= !status.is_unhealthy();
        checks.push(CheckResult::from((check.name(), status)));
    }

    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            checks,
        }),
    )
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_from_status() {
        let healthy = CheckResult::from(("database", HealthStatus::Healthy));
        assert_eq!(healthy.status, "healthy");
        assert!(healthy.message.is_none());

        let down = CheckResult::from(("database", HealthStatus::Unhealthy("refused".to_string())));
        assert_eq!(down.status, "unhealthy");
        assert_eq!(down.message.as_deref(), Some("refused"));
    }
}
