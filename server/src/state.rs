//! Application state shared across request handlers.

use crate::search::SearchProvider;
use consentry_history::HistoryStore;
use consentry_scanner::ScanOrchestrator;
use std::sync::Arc;

/// Engine handles shared by all routes.
pub struct AppState {
    /// Batch scan orchestrator
    pub orchestrator: ScanOrchestrator,
    /// Session history store
    pub history: Arc<HistoryStore>,
    /// Upstream search provider, absent when no API key is configured
    pub search: Option<Arc<dyn SearchProvider>>,
}
