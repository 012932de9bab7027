use std::sync::Arc;

use async_trait::async_trait;
use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_core::report::{NewReport, Report, REPORT_ENTITY};
use csp_scout_core::search::{Page, ReportFilter};
use csp_scout_core::types::ReportId;
use csp_scout_db::ReportRepository;

/// Report ingestion and retrieval.
#[async_trait]
pub trait ReportsService: Send + Sync {
    async fn create(&self, ctx: &RequestContext, input: NewReport) -> Result<Report, CoreError>;

    /// Fetch by the 24-hex-char wire id. Malformed ids fail validation
    /// without reaching the store.
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Report, CoreError>;

    async fn list(
        &self,
        ctx: &RequestContext,
        filter: &ReportFilter,
        page: Page,
    ) -> Result<Vec<Report>, CoreError>;
}

/// Repository-backed [`ReportsService`].
pub struct Reports {
    repo: Arc<dyn ReportRepository>,
}

impl Reports {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ReportsService for Reports {
    async fn create(&self, ctx: &RequestContext, input: NewReport) -> Result<Report, CoreError> {
        self.repo.create(ctx, input).await
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Report, CoreError> {
        if id.is_empty() {
            return Err(CoreError::Validation("id is required".into()));
        }
        let report_id = ReportId::parse(id)?;

        self.repo
            .get_by_id(ctx, report_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: REPORT_ENTITY,
                id: report_id.to_hex(),
            })
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        filter: &ReportFilter,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        self.repo.find(ctx, filter, page).await
    }
}
