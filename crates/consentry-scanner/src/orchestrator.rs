//! Session orchestrator for URL batch scans.
//!
//! Runs each URL of a batch through the renderer and detection pipeline,
//! isolating failures per URL, then assembles the session and hands it to
//! the history store.

use crate::error::{Result, ScanError};
use crate::{pipeline, score};
use consentry_browser::PageRenderer;
use consentry_core::{ScanKind, ScanSession, UrlScanResult};
use consentry_history::HistoryStore;
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Orchestrates batch scans across a URL list.
///
/// URLs are processed strictly sequentially by default (one browsing
/// context at a time); `with_max_concurrent_scans` opts into a bounded
/// worker pool. In both modes the output sequence preserves input URL
/// order and a failure on one URL never affects the others.
pub struct ScanOrchestrator {
    /// Page renderer for fetching and rendering URLs
    renderer: Arc<dyn PageRenderer>,
    /// History store receiving completed sessions
    history: Arc<HistoryStore>,
    /// Maximum concurrent page renders
    max_concurrent_scans: usize,
}

impl ScanOrchestrator {
    /// Create a new orchestrator scanning one URL at a time.
    #[must_use]
    pub fn new(renderer: Arc<dyn PageRenderer>, history: Arc<HistoryStore>) -> Self {
        Self {
            renderer,
            history,
            max_concurrent_scans: 1,
        }
    }

    /// Set the maximum number of concurrent page renders.
    #[must_use]
    pub fn with_max_concurrent_scans(mut self, max: usize) -> Self {
        self.max_concurrent_scans = max.max(1);
        self
    }

    /// Scan a batch of URLs, yielding exactly one result row per URL in
    /// submission order.
    ///
    /// A URL whose render fails contributes an all-sentinel row with score
    /// 0 instead of aborting the batch. Cancellation stops further URLs
    /// from starting and returns [`ScanError::Cancelled`]; per-URL
    /// browsing-context cleanup is owned by the renderer.
    pub async fn scan_urls(
        &self,
        urls: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<UrlScanResult>> {
        let tasks = urls.iter().cloned().map(|url| {
            let cancel = cancel.clone();
            async move {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(self.scan_one(&url).await)
            }
        });
        let rows: Vec<Option<UrlScanResult>> = futures::stream::iter(tasks)
            .buffered(self.max_concurrent_scans)
            .collect()
            .await;

        let mut results = Vec::with_capacity(urls.len());
        for row in rows {
            match row {
                Some(result) => results.push(result),
                None => return Err(ScanError::Cancelled),
            }
        }

        Ok(results)
    }

    /// Scan the batch, persist it as a session, and return the generated
    /// filename together with the result rows.
    ///
    /// Persistence errors surface to the caller and are not retried; a
    /// cancelled batch persists nothing.
    pub async fn run_session(
        &self,
        urls: &[String],
        query: &str,
        kind: ScanKind,
        cancel: &CancellationToken,
    ) -> Result<(String, Vec<UrlScanResult>)> {
        let results = self.scan_urls(urls, cancel).await?;
        let session = ScanSession::new(query, kind, results);
        let filename = self.history.save(&session).await?;

        info!(
            filename,
            urls = session.results.len(),
            query,
            "scan session completed"
        );

        Ok((filename, session.results))
    }

    /// Render and analyze one URL. Never fails: render errors collapse
    /// into the all-sentinel row.
    async fn scan_one(&self, url: &str) -> UrlScanResult {
        match self.renderer.render(url).await {
            Ok(page) => {
                let signals = pipeline::analyze(&page);
                let rgpd_score = score::rgpd_score(signals.consent_version, &signals.cmp_names);
                debug!(url, score = rgpd_score, "page scanned");

                UrlScanResult {
                    url: url.to_string(),
                    signals,
                    rgpd_score,
                }
            }
            Err(e) => {
                warn!(url, error = %e, "scan failed, recording undetected result");
                UrlScanResult::undetected(url)
            }
        }
    }
}
