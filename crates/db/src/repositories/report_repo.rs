//! MongoDB-backed [`ReportRepository`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_core::report::{NewReport, Report, TopDirectiveResult, TopIpResult};
use csp_scout_core::search::{Page, ReportFilter};
use csp_scout_core::types::{ReportId, UnixSeconds};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, IndexModel};

use super::ReportRepository;
use crate::config::DbConfig;
use crate::models::report::{generate_id, ReportDocument, TopDirectiveRow, TopIpRow};
use crate::pipelines::{self, CLIENT_IP_PATH, REPORT_TIME_PATH, USER_AGENT_PATH, VIOLATED_DIRECTIVE_PATH};

/// Reports stored in one MongoDB collection, over one pooled client.
pub struct MongoReportRepo {
    client: Client,
    database: String,
    collection: Collection<ReportDocument>,
    closed: AtomicBool,
}

impl MongoReportRepo {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self {
            client,
            database: database.to_string(),
            collection,
            closed: AtomicBool::new(false),
        }
    }

    /// Connect with `config` and verify the server answers a ping.
    pub async fn connect(config: &DbConfig) -> Result<Self, CoreError> {
        let client = crate::create_client(&config.uri, config.connect_timeout)
            .await
            .map_err(store_failure("connect"))?;
        crate::health_check(&client, &config.database)
            .await
            .map_err(store_failure("ping"))?;

        tracing::debug!(
            database = %config.database,
            collection = %config.collection,
            "Report store connected"
        );
        Ok(Self::new(client, &config.database, &config.collection))
    }

    /// Create the indexes operators typically want on the collection.
    ///
    /// None of them is required for correctness.
    pub async fn ensure_indexes(&self) -> Result<(), CoreError> {
        let indexes = [CLIENT_IP_PATH, VIOLATED_DIRECTIVE_PATH, REPORT_TIME_PATH]
            .into_iter()
            .map(|path| {
                IndexModel::builder()
                    .keys(field_filter(path, Bson::Int32(1)))
                    .build()
            });

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(store_failure("create indexes"))?;
        Ok(())
    }

    async fn find_where(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        filter: &ReportFilter,
        query: Document,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        let mut options = FindOptions::default();
        options.limit = page.limit;
        options.skip = (page.offset > 0).then_some(page.offset);

        ctx.run(operation, async {
            let cursor = self
                .collection
                .find(query)
                .with_options(options)
                .await
                .map_err(query_failure(operation, filter))?;
            let documents: Vec<ReportDocument> = cursor
                .try_collect()
                .await
                .map_err(query_failure(operation, filter))?;

            tracing::debug!(operation, filter = %filter, count = documents.len(), "Reports fetched");
            Ok(documents.into_iter().map(Report::from).collect())
        })
        .await
    }
}

#[async_trait]
impl ReportRepository for MongoReportRepo {
    async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError> {
        const OP: &str = "ping";
        ctx.run(OP, async {
            crate::health_check(&self.client, &self.database)
                .await
                .map_err(store_failure(OP))
        })
        .await
    }

    async fn create(&self, ctx: &RequestContext, input: NewReport) -> Result<Report, CoreError> {
        const OP: &str = "insert report";
        let report = input.into_report(generate_id);
        let document = ReportDocument::from(report.clone());

        ctx.run(OP, async {
            self.collection
                .insert_one(&document)
                .await
                .map_err(store_failure(OP))?;
            Ok(())
        })
        .await?;

        Ok(report)
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: ReportId) -> Result<Option<Report>, CoreError> {
        const OP: &str = "get report";
        ctx.run(OP, async {
            let found = self
                .collection
                .find_one(doc! { "_id": ObjectId::from_bytes(id.bytes()) })
                .await
                .map_err(store_failure(OP))?;
            Ok(found.map(Report::from))
        })
        .await
    }

    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Vec<Report>, CoreError> {
        self.find_where(ctx, "list reports", &ReportFilter::All, Document::new(), page)
            .await
    }

    async fn find_by_time_lt(
        &self,
        ctx: &RequestContext,
        time: UnixSeconds,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        let query = field_filter(REPORT_TIME_PATH, doc! { "$lt": time }.into());
        self.find_where(ctx, "find reports before", &ReportFilter::ReportedBefore(time), query, page)
            .await
    }

    async fn find_by_time_gt(
        &self,
        ctx: &RequestContext,
        time: UnixSeconds,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        let query = field_filter(REPORT_TIME_PATH, doc! { "$gt": time }.into());
        self.find_where(ctx, "find reports after", &ReportFilter::ReportedAfter(time), query, page)
            .await
    }

    async fn find_by_user_agent(
        &self,
        ctx: &RequestContext,
        user_agent: &str,
        page: Page,
    ) -> Result<Vec<Report>, CoreError> {
        let query = field_filter(USER_AGENT_PATH, Bson::String(user_agent.to_string()));
        let filter = ReportFilter::UserAgent(user_agent.to_string());
        self.find_where(ctx, "find reports by user agent", &filter, query, page)
            .await
    }

    async fn top_ips(&self, ctx: &RequestContext) -> Result<Vec<TopIpResult>, CoreError> {
        const OP: &str = "top ips";
        ctx.run(OP, async {
            let cursor = self
                .collection
                .aggregate(pipelines::top_ips())
                .await
                .map_err(store_failure(OP))?;
            let rows: Vec<TopIpRow> = cursor
                .with_type::<TopIpRow>()
                .try_collect()
                .await
                .map_err(store_failure(OP))?;
            Ok(rows.into_iter().map(TopIpResult::from).collect())
        })
        .await
    }

    async fn top_violated_directives(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<TopDirectiveResult>, CoreError> {
        const OP: &str = "top directives";
        ctx.run(OP, async {
            let cursor = self
                .collection
                .aggregate(pipelines::top_violated_directives())
                .await
                .map_err(store_failure(OP))?;
            let rows: Vec<TopDirectiveRow> = cursor
                .with_type::<TopDirectiveRow>()
                .try_collect()
                .await
                .map_err(store_failure(OP))?;
            Ok(rows.into_iter().map(TopDirectiveResult::from).collect())
        })
        .await
    }

    async fn close(&self) -> Result<(), CoreError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.client.clone().shutdown().await;
        tracing::info!("Report store connection closed");
        Ok(())
    }
}

/// Single-field filter (or index key) document for a dotted `path`.
fn field_filter(path: &str, value: Bson) -> Document {
    let mut document = Document::new();
    document.insert(path, value);
    document
}

/// Log a driver failure with its operation and convert it.
fn store_failure(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> CoreError {
    move |err| {
        tracing::error!(operation, error = %err, "Report store operation failed");
        CoreError::store(operation, err)
    }
}

/// Like [`store_failure`], also recording the log-safe filter summary.
fn query_failure<'a>(
    operation: &'static str,
    filter: &'a ReportFilter,
) -> impl FnOnce(mongodb::error::Error) -> CoreError + 'a {
    move |err| {
        tracing::error!(operation, filter = %filter, error = %err, "Report store operation failed");
        CoreError::store(operation, err)
    }
}
