use consentry_browser::{BrowserEngine, PageRenderer};
use consentry_core::config::BrowserConfig;

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_creation() {
    let engine = BrowserEngine::new(&BrowserConfig::default()).await;
    assert!(engine.is_ok(), "Failed to create browser engine");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_render_real_page() {
    let engine = BrowserEngine::new(&BrowserConfig::default())
        .await
        .unwrap();

    let page = engine.render("https://example.com").await.unwrap();
    assert!(page.html.contains("Example Domain"));
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_render_failure_is_typed() {
    let engine = BrowserEngine::new(&BrowserConfig::default())
        .await
        .unwrap();

    // Unresolvable host: the render fails but the engine stays usable.
    let result = engine.render("https://no-such-host.invalid").await;
    assert!(result.is_err());

    let page = engine.render("https://example.com").await;
    assert!(page.is_ok());
}
