//! In-memory [`ReportRepository`] for tests and local development.
//!
//! Keeps reports in insertion order, which stands in for the store's native
//! order. Aggregation ties therefore resolve in first-seen order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_core::report::{
    NewReport, Report, TopDirectiveResult, TopIpResult, TOP_DIRECTIVES_LIMIT, TOP_IPS_LIMIT,
};
use csp_scout_core::search::{Page, ReportFilter};
use csp_scout_core::types::{ReportId, UnixSeconds};
use tokio::sync::RwLock;

use super::ReportRepository;
use crate::models::report::generate_id;

/// Message carried by [`CoreError::Store`] while the simulated outage is on.
pub const UNAVAILABLE_MESSAGE: &str = "store unavailable";

#[derive(Clone)]
pub struct InMemoryReportRepo {
    reports: Arc<RwLock<Vec<Report>>>,
    available: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
    latency: Duration,
}

impl Default for InMemoryReportRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReportRepo {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(RwLock::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
            closed: Arc::new(AtomicBool::new(false)),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation by `latency` before touching the data.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Toggle a simulated outage. While unavailable every operation fails
    /// with [`CoreError::Store`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of stored reports.
    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Wait out the configured latency, then fail if the store is down.
    async fn enter(&self, operation: &'static str) -> Result<(), CoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_closed() {
            return Err(CoreError::store(operation, "repository closed"));
        }
        if !self.available.load(Ordering::SeqCst) {
            tracing::error!(operation, "Report store operation failed: {UNAVAILABLE_MESSAGE}");
            return Err(CoreError::store(operation, UNAVAILABLE_MESSAGE));
        }
        Ok(())
    }

    async fn select(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        filter: ReportFilter,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        ctx.run(operation, async {
            self.enter(operation).await?;
            let reports = self.reports.read().await;
            Ok(page.apply(reports.iter().filter(|r| filter.matches(&r.report)).cloned()))
        })
        .await
    }

    async fn top_k(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        key: fn(&Report) -> &str,
        limit: i64,
    ) -> Result<Vec<(String, u64)>, CoreError> {
        ctx.run(operation, async {
            self.enter(operation).await?;
            let reports = self.reports.read().await;
            Ok(count_top(reports.iter().map(key), limit))
        })
        .await
    }
}

/// Count occurrences, order by count descending (ties in first-seen order)
/// and keep the first `limit`.
fn count_top<'a>(keys: impl Iterator<Item = &'a str>, limit: i64) -> Vec<(String, u64)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for key in keys {
        match slots.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit.max(0) as usize);
    counts
}

#[async_trait]
impl ReportRepository for InMemoryReportRepo {
    async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError> {
        ctx.run("ping", self.enter("ping")).await
    }

    async fn create(&self, ctx: &RequestContext, input: NewReport) -> Result<Report, CoreError> {
        const OP: &str = "insert report";
        ctx.run(OP, async {
            self.enter(OP).await?;
            let report = input.into_report(generate_id);
            self.reports.write().await.push(report.clone());
            Ok(report)
        })
        .await
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: ReportId) -> Result<Option<Report>, CoreError> {
        const OP: &str = "get report";
        ctx.run(OP, async {
            self.enter(OP).await?;
            let reports = self.reports.read().await;
            Ok(reports.iter().find(|r| r.id == id).cloned())
        })
        .await
    }

    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Vec<Report>, CoreError> {
        self.select(ctx, "list reports", ReportFilter::All, page).await
    }

    async fn find_by_time_lt(
        &self,
        ctx: &RequestContext,
        time: UnixSeconds,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        self.select(ctx, "find reports before", ReportFilter::ReportedBefore(time), page)
            .await
    }

    async fn find_by_time_gt(
        &self,
        ctx: &RequestContext,
        time: UnixSeconds,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        self.select(ctx, "find reports after", ReportFilter::ReportedAfter(time), page)
            .await
    }

    async fn find_by_user_agent(
        &self,
        ctx: &RequestContext,
        user_agent: &str,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        let filter = ReportFilter::UserAgent(user_agent.to_string());
        self.select(ctx, "find reports by user agent", filter, page)
            .await
    }

    async fn top_ips(&self, ctx: &RequestContext) -> Result<Vec<TopIpResult>, CoreError> {
        let rows = self
            .top_k(ctx, "top ips", |r| r.report.client_ip.as_str(), TOP_IPS_LIMIT)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(ip, count)| TopIpResult { ip, count })
            .collect())
    }

    async fn top_violated_directives(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<TopDirectiveResult>, CoreError> {
        let rows = self
            .top_k(
                ctx,
                "top directives",
                |r| r.report.violated_directive.as_str(),
                TOP_DIRECTIVES_LIMIT,
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(|(directive, count)| TopDirectiveResult { directive, count })
            .collect())
    }

    async fn close(&self) -> Result<(), CoreError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
