//! Handlers for report ingestion and retrieval.
//!
//! Report bodies are parsed as JSON whatever the declared content type;
//! browsers post violation reports as `application/csp-report`.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use csp_scout_core::context::RequestContext;
use csp_scout_core::report::NewReport;
use csp_scout_core::search::{Page, ReportFilter};

use crate::error::{AppError, AppResult};
use crate::query::ReportListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /reports
// ---------------------------------------------------------------------------

/// Store a violation report and echo it back with its assigned id.
pub async fn create_report(
    ctx: RequestContext,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: NewReport =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let report = state.service.reports.create(&ctx, input).await?;

    tracing::info!(
        report_id = %report.id,
        violated_directive = %report.report.violated_directive,
        disposition = %report.report.disposition,
        "CSP report stored",
    );
    tracing::debug!(report_id = %report.id, client_ip = %report.report.client_ip, "CSP report origin");

    Ok((StatusCode::CREATED, Json(report)))
}

// ---------------------------------------------------------------------------
// GET /reports
// ---------------------------------------------------------------------------

/// List reports, optionally filtered by time or user agent and paginated.
pub async fn list_reports(
    ctx: RequestContext,
    State(state): State<AppState>,
    params: Result<Query<ReportListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let filter = ReportFilter::from_params(params.before, params.after, params.user_agent)?;
    let page = Page::from_params(params.limit, params.offset);

    let reports = state.service.reports.list(&ctx, &filter, page).await?;

    tracing::debug!(filter = %filter, count = reports.len(), "Reports listed");

    Ok(Json(reports))
}

// ---------------------------------------------------------------------------
// GET /reports/{id}
// ---------------------------------------------------------------------------

pub async fn get_report(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = state.service.reports.get_by_id(&ctx, id.trim()).await?;
    Ok(Json(report))
}

/// `GET /reports/` with an empty id segment.
pub async fn missing_report_id() -> AppError {
    AppError::BadRequest("id is required".into())
}
