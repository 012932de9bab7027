//! Integration tests for the MongoDB report repository.
//!
//! These need a reachable server. Run them with
//! `MONGODB_URI=mongodb://localhost:27017 cargo test -p csp-scout-db -- --ignored`.
//! Each test works in its own uniquely named collection and drops it after.

use assert_matches::assert_matches;
use csp_scout_core::context::RequestContext;
use csp_scout_core::error::CoreError;
use csp_scout_core::report::{NewReport, ReportData, TopIpResult};
use csp_scout_core::search::Page;
use csp_scout_core::types::ReportId;
use csp_scout_db::{DbConfig, MongoReportRepo, ReportRepository};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct TestStore {
    repo: MongoReportRepo,
    config: DbConfig,
}

impl TestStore {
    async fn open() -> Self {
        let mut config = DbConfig::from_env().expect("invalid MongoDB settings");
        config.database = "csp_scout_test".to_string();
        config.collection = format!("reports_{}", ObjectId::new().to_hex());
        let repo = MongoReportRepo::connect(&config)
            .await
            .expect("MongoDB must be reachable for ignored tests");
        Self { repo, config }
    }

    async fn drop_collection(self) {
        let client = csp_scout_db::create_client(&self.config.uri, self.config.connect_timeout)
            .await
            .unwrap();
        client
            .database(&self.config.database)
            .collection::<Document>(&self.config.collection)
            .drop()
            .await
            .unwrap();
        self.repo.close().await.unwrap();
    }
}

fn new_report(f: impl FnOnce(&mut ReportData)) -> NewReport {
    let mut data = ReportData::default();
    f(&mut data);
    NewReport { id: None, report: data }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn create_then_get_round_trips() {
    let store = TestStore::open().await;
    let ctx = RequestContext::new();

    let created = store
        .repo
        .create(
            &ctx,
            new_report(|d| {
                d.document_uri = "https://example.com".into();
                d.violated_directive = "script-src".into();
                d.client_ip = "192.168.1.1".into();
                d.line_number = 42;
                d.report_time = 1_700_000_000;
            }),
        )
        .await
        .unwrap();

    let fetched = store.repo.get_by_id(&ctx, created.id).await.unwrap();
    assert_eq!(fetched, Some(created));

    store.drop_collection().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn missing_id_is_none() {
    let store = TestStore::open().await;
    let id = ReportId::parse("64b8f8f0f0f0f0f0f0f0f0f0").unwrap();
    let found = store.repo.get_by_id(&RequestContext::new(), id).await.unwrap();
    assert!(found.is_none());
    store.drop_collection().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn time_filters_are_strict_and_pagination_applies() {
    let store = TestStore::open().await;
    let ctx = RequestContext::new();
    for t in [100, 200, 300, 400] {
        store
            .repo
            .create(&ctx, new_report(|d| d.report_time = t))
            .await
            .unwrap();
    }

    let before = store.repo.find_by_time_lt(&ctx, 200, Page::default()).await.unwrap();
    assert_eq!(before.len(), 1);

    let after = store.repo.find_by_time_gt(&ctx, 200, Page::default()).await.unwrap();
    assert_eq!(after.len(), 2);

    let page = store
        .repo
        .list(&ctx, Page::from_params(Some(2), Some(1)))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    store.drop_collection().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn top_ips_aggregates_server_side() {
    let store = TestStore::open().await;
    let ctx = RequestContext::new();
    for (ip, n) in [("1.1.1.1", 10), ("2.2.2.2", 5), ("3.3.3.3", 1)] {
        for _ in 0..n {
            store
                .repo
                .create(&ctx, new_report(|d| d.client_ip = ip.into()))
                .await
                .unwrap();
        }
    }

    let top = store.repo.top_ips(&ctx).await.unwrap();
    assert_eq!(
        top,
        vec![
            TopIpResult { ip: "1.1.1.1".into(), count: 10 },
            TopIpResult { ip: "2.2.2.2".into(), count: 5 },
            TopIpResult { ip: "3.3.3.3".into(), count: 1 },
        ]
    );

    store.drop_collection().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn top_directives_respects_limit() {
    let store = TestStore::open().await;
    let ctx = RequestContext::new();
    for n in 1..=12 {
        for _ in 0..n {
            store
                .repo
                .create(&ctx, new_report(|d| d.violated_directive = format!("directive-{n}")))
                .await
                .unwrap();
        }
    }

    let top = store.repo.top_violated_directives(&ctx).await.unwrap();
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].count, 12);
    assert_eq!(top[9].count, 3);

    store.drop_collection().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn canceled_context_aborts_operation() {
    let store = TestStore::open().await;
    let ctx = RequestContext::new();
    ctx.cancel();
    assert_matches!(
        store.repo.list(&ctx, Page::default()).await,
        Err(CoreError::Canceled { .. })
    );
    store.drop_collection().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn ensure_indexes_and_close_twice() {
    let store = TestStore::open().await;
    store.repo.ensure_indexes().await.unwrap();
    store.repo.close().await.unwrap();
    store.repo.close().await.unwrap();
    store.drop_collection().await;
}
