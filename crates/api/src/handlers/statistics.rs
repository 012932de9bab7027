//! Handlers for aggregate report statistics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use csp_scout_core::context::RequestContext;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /statistics/top-ips -- the 20 client IPs with the most reports.
pub async fn top_ips(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = state.service.statistics.top_ips(&ctx).await?;
    Ok(Json(rows))
}

/// GET /statistics/top-directives -- the 10 most violated directives.
pub async fn top_directives(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = state.service.statistics.top_violated_directives(&ctx).await?;
    Ok(Json(rows))
}
