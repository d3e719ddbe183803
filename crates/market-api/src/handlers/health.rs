//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use market_service::dto::{HealthChecks, HealthResponse, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health, GET /health/live
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database and Redis reachable", body = ReadinessResponse),
        (status = 503, description = "A dependency is down", body = ReadinessResponse),
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match market_db::ping(state.db_pool()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Readiness: database unreachable");
            false
        }
    };

    let redis = match state.redis_pool().health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Readiness: redis unreachable");
            false
        }
    };

    let response = ReadinessResponse::new(HealthChecks { database, redis });
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
