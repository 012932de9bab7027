//! Extractor deriving each request's [`RequestContext`].

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use csp_scout_core::context::RequestContext;

use crate::state::AppState;

/// Each request gets a child of the server-wide shutdown token, so stopping
/// the server cancels in-flight store calls. A client disconnect drops the
/// handler future, and the store call with it.
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::child_of(&state.shutdown))
    }
}
