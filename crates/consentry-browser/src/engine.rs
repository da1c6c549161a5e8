use crate::error::{BrowserError, Result};
use crate::meta;
use crate::renderer::{extract_domain, MetaTag, PageRenderer, RenderedPage};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use consentry_core::config::BrowserConfig as BrowserSettings;
use futures::StreamExt;
use std::time::Duration;

/// Interval between content re-polls while waiting for meta tags.
const META_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chromium-backed page renderer.
///
/// One shared browser process; every render opens its own page and closes
/// it on every exit path, so a failed navigation never leaks a browsing
/// context.
pub struct BrowserEngine {
    browser: Browser,
    navigation_timeout: Duration,
    load_timeout: Duration,
    meta_timeout: Duration,
}

impl BrowserEngine {
    /// Launch a browser process configured from the application settings.
    pub async fn new(settings: &BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Chromium)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        // Drive the CDP event loop for the lifetime of the engine.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            navigation_timeout: Duration::from_secs(settings.navigation_timeout_secs),
            load_timeout: Duration::from_secs(settings.load_timeout_secs),
            meta_timeout: Duration::from_secs(settings.meta_timeout_secs),
        })
    }

    /// Navigate, wait for readiness, and extract markup + meta tags.
    ///
    /// The load-event wait is bounded and non-fatal: the document is only
    /// required to be minimally parsed. Meta resolution is also bounded
    /// and resolves to whatever was collected when the budget runs out.
    async fn render_on_page(&self, page: &Page, url: &str) -> Result<RenderedPage> {
        match tokio::time::timeout(self.navigation_timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(BrowserError::Navigation(format!("{url}: {e}")));
            }
            Err(_) => {
                return Err(BrowserError::Timeout(format!(
                    "navigation to {url} timed out after {:?}",
                    self.navigation_timeout
                )));
            }
        }

        match tokio::time::timeout(self.load_timeout, page.wait_for_navigation()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                tracing::debug!(url, error = %e, "load event wait failed, using parsed document");
            }
            Err(_) => {
                tracing::debug!(url, "load event wait timed out, using parsed document");
            }
        }

        let html = page
            .content()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        let meta_tags = self.resolve_meta_tags(page, &html).await;

        Ok(RenderedPage { html, meta_tags })
    }

    /// Re-poll page content until a description tag appears or the meta
    /// budget is exhausted. Never fails: the caller gets whatever tags
    /// were collected last.
    async fn resolve_meta_tags(&self, page: &Page, html: &str) -> Vec<MetaTag> {
        let mut tags = meta::collect_meta_tags(html);
        if has_description(&tags) {
            return tags;
        }

        let deadline = tokio::time::Instant::now() + self.meta_timeout;
        while tokio::time::Instant::now() < deadline {
            tokio::time::sleep(META_POLL_INTERVAL).await;

            match page.content().await {
                Ok(html) => {
                    tags = meta::collect_meta_tags(&html);
                    if has_description(&tags) {
                        return tags;
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "meta re-poll failed");
                    break;
                }
            }
        }

        tags
    }
}

#[async_trait::async_trait]
impl PageRenderer for BrowserEngine {
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        let domain = extract_domain(url).unwrap_or_else(|_| url.to_string());
        tracing::debug!(%domain, "rendering page");

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        let result = self.render_on_page(&page, url).await;

        // Release the browsing context regardless of the render outcome.
        if let Err(e) = page.close().await {
            tracing::warn!(%domain, error = %e, "failed to close page");
        }

        result
    }
}

fn has_description(tags: &[MetaTag]) -> bool {
    tags.iter()
        .any(|tag| tag.name == "description" || tag.name == "og:description")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_description() {
        let tags = vec![MetaTag {
            name: "viewport".to_string(),
            content: "width=device-width".to_string(),
        }];
        assert!(!has_description(&tags));

        let tags = vec![MetaTag {
            name: "og:description".to_string(),
            content: "Running shoes for everyone.".to_string(),
        }];
        assert!(has_description(&tags));
    }

    #[test]
    fn test_meta_poll_interval_fits_budget() {
        // The default meta budget allows several re-polls.
        let settings = BrowserSettings::default();
        let budget = Duration::from_secs(settings.meta_timeout_secs);
        assert!(budget >= 4 * META_POLL_INTERVAL);
    }
}
