use std::sync::Arc;

use async_trait::async_trait;
use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_core::report::{TopDirectiveResult, TopIpResult};
use csp_scout_db::ReportRepository;

/// Aggregate statistics over stored reports.
#[async_trait]
pub trait StatisticsService: Send + Sync {
    async fn top_ips(&self, ctx: &RequestContext) -> Result<Vec<TopIpResult>, CoreError>;

    async fn top_violated_directives(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<TopDirectiveResult>, CoreError>;
}

/// Repository-backed [`StatisticsService`].
pub struct Statistics {
    repo: Arc<dyn ReportRepository>,
}

impl Statistics {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl StatisticsService for Statistics {
    async fn top_ips(&self, ctx: &RequestContext) -> Result<Vec<TopIpResult>, CoreError> {
        self.repo.top_ips(ctx).await
    }

    async fn top_violated_directives(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<TopDirectiveResult>, CoreError> {
        self.repo.top_violated_directives(ctx).await
    }
}
