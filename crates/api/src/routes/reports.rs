//! Route definitions for reports.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes.
///
/// ```text
/// POST   /reports          -> create_report
/// GET    /reports          -> list_reports
/// GET    /reports/         -> missing_report_id (400)
/// GET    /reports/{id}     -> get_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reports",
            post(reports::create_report).get(reports::list_reports),
        )
        .route("/reports/", get(reports::missing_report_id))
        .route("/reports/{id}", get(reports::get_report))
}
