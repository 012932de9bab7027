//! The reserved `/api/v2` prefix answers 501 for every method and path.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, send};
use csp_scout_db::InMemoryReportRepo;
use serde_json::json;

async fn assert_not_implemented(method: Method, uri: &str) {
    let app = build_test_app(InMemoryReportRepo::new());
    let request = Request::builder()
        .method(method.clone())
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(
        response.status(),
        StatusCode::NOT_IMPLEMENTED,
        "{method} {uri}"
    );
    assert_eq!(
        body_json(response).await,
        json!({ "error": "V2 not implemented yet" })
    );
}

#[tokio::test]
async fn v2_paths_return_501_for_any_method() {
    for uri in [
        "/api/v2",
        "/api/v2/",
        "/api/v2/reports",
        "/api/v2/reports/64b8f8f0f0f0f0f0f0f0f0f0",
        "/api/v2/statistics/top-ips",
        "/api/v2/anything/at/all",
    ] {
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            assert_not_implemented(method, uri).await;
        }
    }
}

#[tokio::test]
async fn similar_prefix_is_not_reserved() {
    let app = build_test_app(InMemoryReportRepo::new());
    let request = Request::builder()
        .uri("/api/v20/reports")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
