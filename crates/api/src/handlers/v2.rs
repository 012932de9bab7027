use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::routes::v2::is_v2_path;

/// Placeholder for every `/api/v2` route until that version exists.
pub async fn not_implemented() -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "V2 not implemented yet" })),
    )
        .into_response()
}

/// Router fallback: unknown paths get a JSON 404, except under the reserved
/// v2 prefix.
pub async fn fallback(uri: Uri) -> Response {
    if is_v2_path(uri.path()) {
        return not_implemented().await;
    }
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
