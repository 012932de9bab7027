//! Query parameter types for API handlers.

use csp_scout_core::types::UnixSeconds;
use serde::Deserialize;

/// Query parameters for `GET /reports`.
///
/// At most one of `before`, `after` and `user_agent` may be given.
/// `limit`/`offset` are optional; without them every report is returned.
#[derive(Debug, Default, Deserialize)]
pub struct ReportListParams {
    pub before: Option<UnixSeconds>,
    pub after: Option<UnixSeconds>,
    pub user_agent: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
