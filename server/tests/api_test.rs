//! End-to-end route tests against a mock renderer.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use consentry_browser::{collect_meta_tags, BrowserError, PageRenderer, RenderedPage};
use consentry_history::HistoryStore;
use consentry_scanner::ScanOrchestrator;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use consentry::routes;
use consentry::state::AppState;

struct MockRenderer {
    pages: HashMap<String, String>,
}

#[async_trait::async_trait]
impl PageRenderer for MockRenderer {
    async fn render(&self, url: &str) -> consentry_browser::Result<RenderedPage> {
        match self.pages.get(url) {
            Some(html) => Ok(RenderedPage {
                html: html.clone(),
                meta_tags: collect_meta_tags(html),
            }),
            None => Err(BrowserError::Navigation(format!("{url}: dns failure"))),
        }
    }
}

async fn test_app(pages: &[(&str, &str)]) -> (TempDir, Router) {
    let tmp = TempDir::new().expect("create temp dir");
    let history = Arc::new(HistoryStore::open(tmp.path()).await.expect("open store"));

    let renderer = MockRenderer {
        pages: pages
            .iter()
            .map(|(url, html)| ((*url).to_string(), (*html).to_string()))
            .collect(),
    };

    let state = Arc::new(AppState {
        orchestrator: ScanOrchestrator::new(Arc::new(renderer), history.clone()),
        history,
        search: None,
    });

    (tmp, routes::router(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body JSON")
}

fn post_scan(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/scan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

const CONSENT_PAGE: &str = r#"<html><head>
    <script src="https://cdn.cookielaw.org/onetrust.js"></script>
    <script>window.default_consent_state = { ad_storage: 'denied' };</script>
</head></html>"#;

#[tokio::test]
async fn test_scan_and_history_lifecycle() {
    let (_tmp, app) = test_app(&[("https://a.example", CONSENT_PAGE)]).await;

    // Scan: one resolvable URL, one that fails navigation.
    let response = app
        .clone()
        .oneshot(post_scan(json!({
            "urls": ["https://a.example", "https://down.example"],
            "query": "shoes",
            "type": "manual"
        })))
        .await
        .expect("send scan request");
    assert_eq!(response.status(), StatusCode::OK);

    let results = body_json(response).await;
    let rows = results.as_array().expect("results array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["cmpNames"][0], "OneTrust");
    assert_eq!(rows[0]["consentVersion"], "v2");
    assert_eq!(rows[0]["rgpdScore"], 60);
    assert_eq!(rows[1]["rgpdScore"], 0);
    assert_eq!(rows[1]["cms"], "not detected");

    // Listing shows the persisted session.
    let response = app.clone().oneshot(get("/history")).await.expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    let summaries = body_json(response).await;
    assert_eq!(summaries.as_array().map(Vec::len), Some(1));
    assert_eq!(summaries[0]["domainCount"], 2);
    assert_eq!(summaries[0]["query"], "shoes");
    let filename = summaries[0]["filename"]
        .as_str()
        .expect("summary filename")
        .to_string();

    // Detail retrieval round-trips the record.
    let response = app
        .clone()
        .oneshot(get(&format!("/history/{filename}")))
        .await
        .expect("get record");
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    assert_eq!(session["type"], "manual");
    assert_eq!(session["results"].as_array().map(Vec::len), Some(2));

    // Delete succeeds once, then the record is gone.
    let response = app
        .clone()
        .oneshot(delete(&format!("/history/{filename}")))
        .await
        .expect("delete record");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], filename.as_str());

    let response = app
        .clone()
        .oneshot(delete(&format!("/history/{filename}")))
        .await
        .expect("delete again");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get(&format!("/history/{filename}")))
        .await
        .expect("get deleted record");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scan_rejects_non_array_urls() {
    let (_tmp, app) = test_app(&[]).await;

    let response = app
        .oneshot(post_scan(json!({ "urls": "https://a.example" })))
        .await
        .expect("send scan request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid request");
}

#[tokio::test]
async fn test_scan_defaults_query_and_kind() {
    let (_tmp, app) = test_app(&[]).await;

    let response = app
        .clone()
        .oneshot(post_scan(json!({ "urls": [] })))
        .await
        .expect("send scan request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/history")).await.expect("list");
    let summaries = body_json(response).await;
    assert_eq!(summaries[0]["query"], "manual");
    assert!(summaries[0]["filename"]
        .as_str()
        .expect("filename")
        .ends_with("-manual.json"));
}

#[tokio::test]
async fn test_search_rejects_empty_query() {
    let (_tmp, app) = test_app(&[]).await;

    let response = app.oneshot(get("/search?q=")).await.expect("search");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_detail_missing_is_404() {
    let (_tmp, app) = test_app(&[]).await;

    let response = app
        .oneshot(get("/history/scan-nope.json"))
        .await
        .expect("get missing record");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
