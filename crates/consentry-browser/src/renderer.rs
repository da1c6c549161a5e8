use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};

/// One `<meta>` tag observed in the rendered document.
///
/// `name` carries the tag's `name` or `property` attribute, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// A fully rendered page: final markup plus its meta tags.
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    /// Rendered document markup
    pub html: String,
    /// Meta tags collected within the bounded resolution wait. May be
    /// empty when resolution timed out; that is not an error.
    pub meta_tags: Vec<MetaTag>,
}

/// Rendering seam between the orchestrator and the browser backend.
///
/// Implementations own navigation timeouts and browsing-context lifecycle:
/// a context acquired for a render must be released on every exit path,
/// including navigation failure.
#[async_trait::async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render a URL and return its final markup and meta tags.
    async fn render(&self, url: &str) -> Result<RenderedPage>;
}

/// Helper to extract the host from a URL, for logging.
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::Navigation(format!("invalid URL: {e}")))?;

    url.host_str()
        .ok_or_else(|| BrowserError::Navigation("no host in URL".to_string()))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://example.com/path").unwrap(),
            "example.com"
        );
        assert_eq!(
            extract_domain("http://shop.example.com:8080/cart").unwrap(),
            "shop.example.com"
        );
    }

    #[test]
    fn test_extract_domain_invalid() {
        assert!(extract_domain("not-a-url").is_err());
    }
}
