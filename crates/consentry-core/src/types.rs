//! Domain model for consent audits.
//!
//! This module defines the signal record produced by the detection pipeline,
//! the per-URL scan result, the persisted scan session, and the derived
//! listing summary.

use crate::error::ConsentryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel value for the CMS field when no signature matched.
pub const CMS_NOT_DETECTED: &str = "not detected";

/// Sentinel value for the meta description when resolution failed.
pub const META_NOT_FOUND: &str = "not found";

/// Detected consent-mode signalling convention.
///
/// Variants are ordered by signal strength: `None < V1 < V2`. The v2 marker
/// takes priority during detection even when a v1 marker is also present.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConsentVersion {
    /// No consent-mode marker found
    #[default]
    None,
    /// Legacy consent declaration call
    V1,
    /// Default-consent-state declaration
    V2,
}

impl fmt::Display for ConsentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

/// Origin of a scan session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    /// Batch assembled from live search results
    Live,
    /// Batch submitted by hand
    #[default]
    Manual,
}

impl ScanKind {
    /// Stable lowercase form used in generated filenames.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScanKind {
    type Err = ConsentryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "manual" => Ok(Self::Manual),
            other => Err(ConsentryError::Validation(format!(
                "invalid scan kind: expected 'live' or 'manual', got '{other}'"
            ))),
        }
    }
}

/// Compliance-relevant signals extracted from one rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    /// Detected consent-mode version
    pub consent_version: ConsentVersion,
    /// Consent-management platforms detected (empty means none)
    pub cmp_names: Vec<String>,
    /// Content-management system, first matching signature wins
    pub cms: String,
    /// Tag-management systems detected
    pub tms_names: Vec<String>,
    /// Marketing pixels detected
    pub pixel_names: Vec<String>,
    /// Page meta description, or [`META_NOT_FOUND`]
    pub meta_description: String,
    /// Whether any consent-declaration call is observable in markup.
    ///
    /// Independent of `consent_version`: the declaration pattern is looser
    /// than the version markers, so this can be `true` while the version
    /// is `None`.
    pub consent_detected: bool,
}

impl PageSignals {
    /// All-sentinel record used when a page could not be rendered.
    #[must_use]
    pub fn undetected() -> Self {
        Self {
            consent_version: ConsentVersion::None,
            cmp_names: Vec::new(),
            cms: CMS_NOT_DETECTED.to_string(),
            tms_names: Vec::new(),
            pixel_names: Vec::new(),
            meta_description: META_NOT_FOUND.to_string(),
            consent_detected: false,
        }
    }
}

/// Scan outcome for a single URL.
///
/// Invariant: `rgpd_score` is a deterministic pure function of
/// `signals.consent_version` and whether `signals.cmp_names` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlScanResult {
    /// The URL that was scanned
    pub url: String,
    /// Extracted signals, flattened on the wire
    #[serde(flatten)]
    pub signals: PageSignals,
    /// Heuristic compliance score, 0-100
    pub rgpd_score: u8,
}

impl UrlScanResult {
    /// Failure row: every signal at its undetected sentinel, score 0.
    #[must_use]
    pub fn undetected(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            signals: PageSignals::undetected(),
            rgpd_score: 0,
        }
    }
}

/// One batch-scan request's full set of per-URL results.
///
/// Immutable after creation. The session is identified by its generated
/// filename, which is not part of the persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSession {
    /// Query label the batch was scanned under
    pub query: String,
    /// Creation timestamp
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    /// Session origin
    #[serde(rename = "type")]
    pub kind: ScanKind,
    /// Per-URL results, in submission order
    pub results: Vec<UrlScanResult>,
}

impl ScanSession {
    /// Assemble a new session stamped with the current time.
    #[must_use]
    pub fn new(query: impl Into<String>, kind: ScanKind, results: Vec<UrlScanResult>) -> Self {
        Self {
            query: query.into(),
            created_at: Utc::now(),
            kind,
            results,
        }
    }
}

/// Derived listing projection of a stored session. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Record filename, the session's identifier
    pub filename: String,
    /// Session creation timestamp
    pub date: DateTime<Utc>,
    /// Query label
    pub query: String,
    /// Number of scanned domains in the session
    pub domain_count: usize,
    /// Mean `rgpdScore`, `"N/A"` on the wire when the session is empty
    #[serde(with = "average_score")]
    pub average_score: Option<f64>,
}

impl SessionSummary {
    /// Compute the summary for a stored session.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn of(filename: impl Into<String>, session: &ScanSession) -> Self {
        let domain_count = session.results.len();
        let average_score = if domain_count == 0 {
            None
        } else {
            let total: u32 = session.results.iter().map(|r| u32::from(r.rgpd_score)).sum();
            // One-decimal rounding, matching the listing contract.
            Some((f64::from(total) / domain_count as f64 * 10.0).round() / 10.0)
        };

        Self {
            filename: filename.into(),
            date: session.created_at,
            query: session.query.clone(),
            domain_count,
            average_score,
        }
    }
}

/// Serde adapter for `averageScore`: `"N/A"` when absent, number otherwise.
mod average_score {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(score) => ser.serialize_f64(*score),
            None => ser.serialize_str("N/A"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(de)? {
            Raw::Number(n) => Ok(Some(n)),
            Raw::Text(s) if s == "N/A" => Ok(None),
            Raw::Text(s) => s
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid average score '{s}'"))),
        }
    }
}
