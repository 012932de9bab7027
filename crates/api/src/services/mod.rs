//! Service layer between the HTTP handlers and the repository.
//!
//! [`Service`] composes two capability facets, [`ReportsService`] and
//! [`StatisticsService`]. Both accept the caller's [`RequestContext`] first
//! and pass it through unchanged; neither adds timeouts or retries.
//!
//! [`RequestContext`]: csp_scout_core::context::RequestContext

mod reports;
mod statistics;

use std::sync::Arc;

use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_db::ReportRepository;

pub use reports::{Reports, ReportsService};
pub use statistics::{Statistics, StatisticsService};

/// The composite service handed to the HTTP layer.
#[derive(Clone)]
pub struct Service {
    pub reports: Arc<dyn ReportsService>,
    pub statistics: Arc<dyn StatisticsService>,
    repo: Arc<dyn ReportRepository>,
}

impl Service {
    /// Build both facets over one repository.
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self {
            reports: Arc::new(Reports::new(Arc::clone(&repo))),
            statistics: Arc::new(Statistics::new(Arc::clone(&repo))),
            repo,
        }
    }

    /// Build with substitute facets, e.g. test doubles.
    pub fn with_facets(
        repo: Arc<dyn ReportRepository>,
        reports: Arc<dyn ReportsService>,
        statistics: Arc<dyn StatisticsService>,
    ) -> Self {
        Self {
            reports,
            statistics,
            repo,
        }
    }

    /// Store liveness, for the health endpoint.
    pub async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError> {
        self.repo.ping(ctx).await
    }
}
