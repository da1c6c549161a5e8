//! HTTP error mapping.

use crate::search::SearchError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use consentry_history::HistoryError;
use consentry_scanner::ScanError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients as `{error, details}` JSON bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("history store failure: {0}")]
    History(HistoryError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound { filename } => Self::NotFound(filename),
            HistoryError::InvalidFilename { filename } => {
                Self::InvalidRequest(format!("invalid filename '{filename}'"))
            }
            other => Self::History(other),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Scan(_) | Self::History(_) | Self::Search(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid request",
            Self::NotFound(_) => "record not found",
            Self::Scan(_) => "scan failed",
            Self::History(_) => "history store failure",
            Self::Search(_) => "search failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = json!({
            "error": self.label(),
            "details": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
