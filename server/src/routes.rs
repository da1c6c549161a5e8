//! HTTP routes for scanning, history, and search.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use consentry_core::{ScanKind, ScanSession, SessionSummary, UrlScanResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scan", post(scan))
        .route("/history", get(list_history))
        .route("/history/{filename}", get(get_history).delete(delete_history))
        .route("/search", get(search))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Response body for a successful record deletion.
#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
    filename: String,
}

/// Query parameters for `/search`.
#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// `POST /scan` — scan a URL batch and persist it as a session.
///
/// The body must carry a `urls` array; `query` and `type` fall back to
/// `"manual"` when absent. The response is the result row array, one row
/// per submitted URL.
async fn scan(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<UrlScanResult>>, ApiError> {
    let urls = body
        .get("urls")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ApiError::InvalidRequest("request body must contain a list of URLs".to_string())
        })?
        .iter()
        .map(|entry| {
            entry.as_str().map(ToString::to_string).ok_or_else(|| {
                ApiError::InvalidRequest("every URL must be a string".to_string())
            })
        })
        .collect::<Result<Vec<String>, ApiError>>()?;

    let query = body
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or("manual")
        .to_string();

    let kind = match body.get("type").and_then(Value::as_str) {
        Some(raw) => raw
            .parse::<ScanKind>()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
        None => ScanKind::Manual,
    };

    tracing::info!(urls = urls.len(), query, %kind, "scan requested");

    let (_filename, results) = state
        .orchestrator
        .run_session(&urls, &query, kind, &CancellationToken::new())
        .await?;

    Ok(Json(results))
}

/// `GET /history` — session summaries, newest first.
async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let summaries = state.history.list().await?;
    Ok(Json(summaries))
}

/// `GET /history/{filename}` — full stored session.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ScanSession>, ApiError> {
    let session = state.history.get(&filename).await?;
    Ok(Json(session))
}

/// `DELETE /history/{filename}` — remove a stored session.
async fn delete_history(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.history.delete(&filename).await?;
    Ok(Json(DeleteResponse {
        success: true,
        filename,
    }))
}

/// `GET /search?q=` — candidate URLs from the upstream search provider.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<crate::search::SearchHit>>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(ApiError::InvalidRequest("empty query".to_string()));
    }

    let provider = state
        .search
        .as_ref()
        .ok_or(ApiError::Search(crate::search::SearchError::NotConfigured))?;

    let hits = provider.search(&params.q).await?;
    Ok(Json(hits))
}
