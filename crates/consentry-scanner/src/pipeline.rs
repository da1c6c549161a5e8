//! Detection pipeline: rendered page to structured signals.

use consentry_browser::{MetaTag, RenderedPage};
use consentry_core::{PageSignals, CMS_NOT_DETECTED, META_NOT_FOUND};
use consentry_signatures::{
    detect_consent_call, detect_consent_version, CMP_SIGNATURES, CMS_SIGNATURES,
    PIXEL_SIGNATURES, TMS_SIGNATURES,
};

/// Minimum length for a meta description to be considered legitimate.
const MIN_DESCRIPTION_LEN: usize = 20;

/// Extract all compliance signals from one rendered page.
///
/// Signature matching runs against the raw markup; the meta description is
/// resolved from the tags the renderer collected within its bounded wait,
/// so this function itself never blocks and never fails.
#[must_use]
pub fn analyze(page: &RenderedPage) -> PageSignals {
    let html = &page.html;

    PageSignals {
        consent_version: detect_consent_version(html),
        cmp_names: CMP_SIGNATURES.match_all(html),
        cms: CMS_SIGNATURES
            .match_first(html)
            .map_or_else(|| CMS_NOT_DETECTED.to_string(), ToString::to_string),
        tms_names: TMS_SIGNATURES.match_all(html),
        pixel_names: PIXEL_SIGNATURES.match_all(html),
        meta_description: resolve_meta_description(&page.meta_tags),
        consent_detected: detect_consent_call(html),
    }
}

/// Fallback chain: `description`, then `og:description`, else sentinel.
fn resolve_meta_description(tags: &[MetaTag]) -> String {
    first_valid(tags, "description")
        .or_else(|| first_valid(tags, "og:description"))
        .unwrap_or_else(|| META_NOT_FOUND.to_string())
}

fn first_valid(tags: &[MetaTag], name: &str) -> Option<String> {
    tags.iter()
        .find(|tag| tag.name == name && is_valid_description(&tag.content))
        .map(|tag| tag.content.clone())
}

/// Reject viewport/charset boilerplate masquerading as a description.
fn is_valid_description(content: &str) -> bool {
    content.len() > MIN_DESCRIPTION_LEN
        && !content.contains("width=device-width")
        && !content.contains("charset")
}
