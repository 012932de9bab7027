#![allow(dead_code)]

use std::net::IpAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use csp_scout_api::config::ServerConfig;
use csp_scout_api::router::build_app_router;
use csp_scout_api::services::Service;
use csp_scout_api::state::AppState;
use csp_scout_db::{InMemoryReportRepo, ReportRepository};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

/// Build a test `ServerConfig` with the production defaults (no request
/// timeout).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        request_timeout_secs: None,
    }
}

/// Build the full application router over the given in-memory repository.
///
/// Uses the same `build_app_router` as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(repo: InMemoryReportRepo) -> Router {
    build_test_app_with(repo, CancellationToken::new())
}

/// Like [`build_test_app`], with a caller-held shutdown token.
pub fn build_test_app_with(repo: InMemoryReportRepo, shutdown: CancellationToken) -> Router {
    let repo: Arc<dyn ReportRepository> = Arc::new(repo);
    build_test_app_for(Service::new(repo), shutdown)
}

/// Build the router over an explicitly assembled [`Service`].
pub fn build_test_app_for(service: Service, shutdown: CancellationToken) -> Router {
    build_test_app_configured(service, shutdown, test_config())
}

/// Build the router with a caller-supplied [`ServerConfig`].
pub fn build_test_app_configured(
    service: Service,
    shutdown: CancellationToken,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        service,
        config: Arc::new(config.clone()),
        shutdown,
    };
    build_app_router(state, &config)
}

/// A representative browser report body.
pub fn sample_report(ip: &str, directive: &str) -> Value {
    json!({
        "report": {
            "documenturi": "https://example.com/page",
            "referrer": "",
            "violateddirective": directive,
            "effectivedirective": directive,
            "originalpolicy": "default-src 'self'; report-uri /api/v1/reports",
            "disposition": "enforce",
            "blockeduri": "https://evil.example/x.js",
            "linenumber": 12,
            "sourcefile": "https://example.com/app.js",
            "statuscode": 200,
            "scriptsample": "",
            "clientip": ip,
            "useragent": "Mozilla/5.0",
            "reporttime": 1_700_000_000
        }
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST `body` to the reports endpoint and return the stored report.
pub async fn create_report(app: &Router, body: &Value) -> Value {
    let response = post_json(app.clone(), "/api/v1/reports", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
