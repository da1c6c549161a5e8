//! Upstream search-results provider (SerpAPI).
//!
//! Maps organic, ad, and shopping results onto `{title, link, type}`
//! tuples feeding live scan batches. The provider sits behind a trait so
//! the rest of the service never depends on the concrete backend.

use consentry_core::config::SearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One candidate URL returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    /// Result channel: `seo`, `ads`, or `shopping`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Search provider errors.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search provider is not configured (missing API key)")]
    NotConfigured,

    #[error("upstream search request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Provider seam for search-result retrieval.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch candidate URLs for a query.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// SerpAPI-backed provider.
pub struct SerpApiProvider {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SerpApiProvider {
    /// Build a provider from the search configuration.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SearchError::NotConfigured)?;

        let response: SerpResponse = self
            .client
            .get("https://serpapi.com/search")
            .query(&[
                ("engine", self.config.engine.as_str()),
                ("q", query),
                ("num", &self.config.num_results.to_string()),
                ("api_key", api_key),
                ("gl", self.config.country.as_str()),
                ("hl", self.config.language.as_str()),
                ("google_domain", self.config.google_domain.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let hits = merge_hits(response);
        tracing::info!(query, results = hits.len(), "search completed");
        Ok(hits)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpEntry>,
    #[serde(default)]
    ads: Vec<SerpEntry>,
    #[serde(default)]
    top_ads: Vec<SerpEntry>,
    #[serde(default)]
    bottom_ads: Vec<SerpEntry>,
    #[serde(default)]
    shopping_results: Vec<SerpEntry>,
}

#[derive(Debug, Deserialize)]
struct SerpEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Merge result channels in presentation order, dropping entries without
/// a link.
fn merge_hits(response: SerpResponse) -> Vec<SearchHit> {
    let channel = |entries: Vec<SerpEntry>, kind: &str| {
        entries
            .into_iter()
            .filter_map(|entry| {
                entry.link.map(|link| SearchHit {
                    title: entry.title.unwrap_or_default(),
                    link,
                    kind: kind.to_string(),
                })
            })
            .collect::<Vec<_>>()
    };

    let mut hits = channel(response.organic_results, "seo");
    let mut ads = response.ads;
    ads.extend(response.top_ads);
    ads.extend(response.bottom_ads);
    hits.extend(channel(ads, "ads"));
    hits.extend(channel(response.shopping_results, "shopping"));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, link: Option<&str>) -> SerpEntry {
        SerpEntry {
            title: Some(title.to_string()),
            link: link.map(ToString::to_string),
        }
    }

    #[test]
    fn test_merge_orders_channels() {
        let response = SerpResponse {
            organic_results: vec![entry("organic", Some("https://a.example"))],
            ads: vec![entry("ad", Some("https://b.example"))],
            top_ads: vec![entry("top ad", Some("https://c.example"))],
            bottom_ads: vec![],
            shopping_results: vec![entry("product", Some("https://d.example"))],
        };

        let hits = merge_hits(response);
        let kinds: Vec<&str> = hits.iter().map(|h| h.kind.as_str()).collect();
        assert_eq!(kinds, vec!["seo", "ads", "ads", "shopping"]);
    }

    #[test]
    fn test_merge_drops_entries_without_links() {
        let response = SerpResponse {
            organic_results: vec![
                entry("has link", Some("https://a.example")),
                entry("no link", None),
            ],
            ..SerpResponse::default()
        };

        let hits = merge_hits(response);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].link, "https://a.example");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let provider = SerpApiProvider::new(SearchConfig::default());
        let err = provider.search("shoes").await;
        assert!(matches!(err, Err(SearchError::NotConfigured)));
    }
}
