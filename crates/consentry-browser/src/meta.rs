//! Meta-tag collection from rendered markup.

use crate::renderer::MetaTag;
use scraper::{Html, Selector};

/// Collect all `<meta>` tags carrying a `name` or `property` attribute
/// and a non-empty `content` attribute.
///
/// Attribute names are lowercased so callers can match `og:description`
/// and `Description` alike.
#[must_use]
pub fn collect_meta_tags(html: &str) -> Vec<MetaTag> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("meta").expect("meta selector is hardcoded and valid");

    document
        .select(&selector)
        .filter_map(|element| {
            let attrs = element.value();
            let name = attrs.attr("name").or_else(|| attrs.attr("property"))?;
            let content = attrs.attr("content")?;
            if content.is_empty() {
                return None;
            }
            Some(MetaTag {
                name: name.to_lowercase(),
                content: content.trim().to_string(),
            })
        })
        .collect()
}
