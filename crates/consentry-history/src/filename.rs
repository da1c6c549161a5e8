//! Record filename generation and validation.

use crate::error::{HistoryError, Result};
use chrono::SecondsFormat;
use consentry_core::ScanSession;

/// Maximum length of the query slug inside a filename.
const SLUG_MAX_LEN: usize = 30;

/// Generate the record filename for a session.
///
/// Layout: `scan-{timestamp}-{slug}-{kind}.json`, where the timestamp is
/// the RFC3339 creation time with `:` and `.` normalized to `-`, and the
/// slug is the lowercased query with non-alphanumeric runs collapsed.
#[must_use]
pub fn session_filename(session: &ScanSession) -> String {
    let timestamp = session
        .created_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");

    format!(
        "scan-{timestamp}-{}-{}.json",
        slugify(&session.query),
        session.kind
    )
}

/// Slugify a query label: lowercase, non-alphanumeric runs collapsed to a
/// single `-`, truncated to 30 characters.
#[must_use]
pub fn slugify(query: &str) -> String {
    let mut slug = String::new();
    let mut previous_was_separator = false;

    for c in query.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            previous_was_separator = false;
        } else if !previous_was_separator {
            slug.push('-');
            previous_was_separator = true;
        }
    }

    slug.chars().take(SLUG_MAX_LEN).collect()
}

/// Reject filenames that could escape the store directory.
pub fn validate(filename: &str) -> Result<()> {
    let valid = !filename.is_empty()
        && !filename.contains(['/', '\\'])
        && !filename.contains("..");

    if valid {
        Ok(())
    } else {
        Err(HistoryError::InvalidFilename {
            filename: filename.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use consentry_core::ScanKind;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Chaussures Running"), "chaussures-running");
        assert_eq!(slugify("shoes  &  socks!"), "shoes-socks-");
        assert_eq!(slugify("2024 sale"), "2024-sale");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a very long query label that goes on and on";
        assert_eq!(slugify(long).chars().count(), 30);
    }

    #[test]
    fn test_session_filename_layout() {
        let mut session = ScanSession::new("Chaussures Running", ScanKind::Manual, Vec::new());
        session.created_at = Utc
            .with_ymd_and_hms(2026, 8, 6, 14, 30, 5)
            .single()
            .expect("valid timestamp");

        let filename = session_filename(&session);
        assert!(filename.starts_with("scan-2026-08-06T14-30-05"));
        assert!(filename.ends_with("-chaussures-running-manual.json"));
        // Normalization leaves no separator characters behind
        assert!(!filename.contains(':'));
        assert_eq!(filename.matches('.').count(), 1);
    }

    #[test]
    fn test_validate_rejects_traversal() {
        assert!(validate("scan-x.json").is_ok());
        assert!(validate("").is_err());
        assert!(validate("../etc/passwd").is_err());
        assert!(validate("sub/dir.json").is_err());
        assert!(validate("sub\\dir.json").is_err());
    }
}
