//! Report persistence capability and its implementations.

mod memory;
mod report_repo;

pub use memory::{InMemoryReportRepo, UNAVAILABLE_MESSAGE};
pub use report_repo::MongoReportRepo;

use async_trait::async_trait;
use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_core::report::{NewReport, Report, TopDirectiveResult, TopIpResult};
use csp_scout_core::search::{Page, ReportFilter};
use csp_scout_core::types::{ReportId, UnixSeconds};

/// Persistence and aggregation over the single reports collection.
///
/// Every operation takes the caller's [`RequestContext`] and returns
/// [`CoreError::Canceled`] promptly if it is canceled while the store is
/// still working. Store failures surface as [`CoreError::Store`]; nothing is
/// retried here.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Liveness probe against the store.
    async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError>;

    /// Insert a report, assigning a fresh id when none (or the zero id) was
    /// supplied. Duplicate submissions produce distinct documents.
    async fn create(&self, ctx: &RequestContext, input: NewReport) -> Result<Report, CoreError>;

    async fn get_by_id(&self, ctx: &RequestContext, id: ReportId) -> Result<Option<Report>, CoreError>;

    /// All reports in store-native order.
    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Vec<Report>, CoreError>;

    /// Reports with `reporttime` strictly less than `time`.
    async fn find_by_time_lt(
        &self,
        ctx: &RequestContext,
        time: UnixSeconds,
        page: Page,
    ) -> Result<Vec<Report>, CoreError>;

    /// Reports with `reporttime` strictly greater than `time`.
    async fn find_by_time_gt(
        &self,
        ctx: &RequestContext,
        time: UnixSeconds,
        page: Page,
    ) -> Result<Vec<Report>, CoreError>;

    /// Reports whose `useragent` equals `user_agent` exactly.
    async fn find_by_user_agent(
        &self,
        ctx: &RequestContext,
        user_agent: &str,
        page: Page,
    ) -> Result<Vec<Report>, CoreError>;

    /// Top 20 client IPs by report count, descending.
    async fn top_ips(&self, ctx: &RequestContext) -> Result<Vec<TopIpResult>, CoreError>;

    /// Top 10 violated directives by report count, descending.
    async fn top_violated_directives(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<TopDirectiveResult>, CoreError>;

    /// Release the store handle. Safe to call more than once.
    async fn close(&self) -> Result<(), CoreError>;

    /// Dispatch a [`ReportFilter`] to the matching query.
    async fn find(
        &self,
        ctx: &RequestContext,
        filter: &ReportFilter,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        match filter {
            ReportFilter::All => self.list(ctx, page).await,
            ReportFilter::ReportedBefore(t) => self.find_by_time_lt(ctx, *t, page).await,
            ReportFilter::ReportedAfter(t) => self.find_by_time_gt(ctx, *t, page).await,
            ReportFilter::UserAgent(ua) => self.find_by_user_agent(ctx, ua, page).await,
        }
    }
}
