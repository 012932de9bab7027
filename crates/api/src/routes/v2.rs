//! Reserved `/api/v2` prefix.
//!
//! Every method on every path under the prefix answers 501, so clients get a
//! predictable error instead of a 404.

use axum::routing::any;
use axum::Router;

use crate::handlers::v2;
use crate::state::AppState;

/// Path prefix reserved for the next API version.
pub const V2_PREFIX: &str = "/api/v2";

/// Mount at the root (not nested) so the bare prefix matches too.
///
/// The catch-all does not match an empty tail, so `/api/v2/` reaches the
/// router fallback, which defers to [`is_v2_path`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route(V2_PREFIX, any(v2::not_implemented))
        .route("/api/v2/{*rest}", any(v2::not_implemented))
}

pub fn is_v2_path(path: &str) -> bool {
    path == V2_PREFIX
        || path
            .strip_prefix(V2_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}
