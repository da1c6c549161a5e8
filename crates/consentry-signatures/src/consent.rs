//! Consent-mode detection.
//!
//! A dedicated two-rule check, separate from the generic signature tables:
//! the v2 default-consent-state marker is tested first and takes priority,
//! then the v1 consent-declaration call. The looser declaration pattern is
//! exposed separately for the independent `consentDetected` signal.

use consentry_core::ConsentVersion;
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker for consent mode v2: a default consent state declaration.
static DEFAULT_CONSENT_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)default_consent_state").expect("consent patterns are hardcoded and valid")
});

/// Marker for consent mode v1: a consent declaration call with a string
/// command argument.
static CONSENT_DECLARATION_V1: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)gtag\(\s*['"]consent['"]\s*,\s*['"]"#)
        .expect("consent patterns are hardcoded and valid")
});

/// Any consent declaration call, regardless of argument shape.
static CONSENT_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)gtag\(\s*['"]consent['"]"#).expect("consent patterns are hardcoded and valid")
});

/// Detect the consent-mode version signalled in rendered markup.
///
/// The v2 marker takes priority even when a v1 marker also matches.
#[must_use]
pub fn detect_consent_version(html: &str) -> ConsentVersion {
    if DEFAULT_CONSENT_STATE.is_match(html) {
        ConsentVersion::V2
    } else if CONSENT_DECLARATION_V1.is_match(html) {
        ConsentVersion::V1
    } else {
        ConsentVersion::None
    }
}

/// Whether any consent-declaration call is observable in markup.
///
/// Strictly looser than the version markers: a declaration passing a
/// non-string argument matches here while [`detect_consent_version`]
/// still reports [`ConsentVersion::None`].
#[must_use]
pub fn detect_consent_call(html: &str) -> bool {
    CONSENT_CALL.is_match(html)
}
