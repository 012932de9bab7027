use axum::extract::State;
use axum::{routing::get, Json, Router};
use csp_scout_core::context::RequestContext;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the report store answers a ping.
    pub store_healthy: bool,
}

/// GET /health -- returns service and store health.
async fn health_check(ctx: RequestContext, State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.service.ping(&ctx).await.is_ok();

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
