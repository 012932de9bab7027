pub mod health;
pub mod reports;
pub mod statistics;
pub mod v2;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports                       create (POST), list (GET)
/// /reports/{id}                  get by id
/// /statistics/top-ips            top 20 client IPs
/// /statistics/top-directives     top 10 violated directives
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reports::router())
        .merge(statistics::router())
}
