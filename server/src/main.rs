//! Consentry server entry point.

use anyhow::Context;
use consentry_browser::BrowserEngine;
use consentry_core::AppConfig;
use consentry_history::HistoryStore;
use consentry_scanner::ScanOrchestrator;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use consentry::routes;
use consentry::search::{SearchProvider, SerpApiProvider};
use consentry::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load_with_env().context("load configuration")?;

    let history_dir = config.history_dir().context("resolve history directory")?;
    let history = Arc::new(
        HistoryStore::open(&history_dir)
            .await
            .context("open history store")?,
    );
    info!(dir = %history_dir.display(), "history store ready");

    let engine = BrowserEngine::new(&config.browser)
        .await
        .context("launch browser engine")?;
    let orchestrator = ScanOrchestrator::new(Arc::new(engine), history.clone())
        .with_max_concurrent_scans(config.scanning.max_concurrent_scans);

    let search: Option<Arc<dyn SearchProvider>> = match &config.search.api_key {
        Some(_) => Some(Arc::new(SerpApiProvider::new(config.search.clone()))),
        None => {
            warn!("CONSENTRY_SERPAPI_KEY not set, /search is disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        orchestrator,
        history,
        search,
    });

    let addr = format!("{}:{}", config.server.bind_addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, routes::router(state))
        .await
        .context("serve HTTP")?;

    Ok(())
}
