use axum::routing::get;
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/statistics/top-ips", get(statistics::top_ips))
        .route("/statistics/top-directives", get(statistics::top_directives))
}
