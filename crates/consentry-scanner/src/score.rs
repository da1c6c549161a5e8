//! Compliance scoring.
//!
//! A pure function from detected consent signals to a 0-100 score. No
//! side effects, no failure modes.

use consentry_core::ConsentVersion;

/// Compute the heuristic compliance score for a page.
///
/// Weights: +40 when at least one CMP was detected, +20 for consent mode
/// v2 or +10 for v1. The result is clamped to 100 as a guard for future
/// weighted signals; current weights top out at 60.
#[must_use]
pub fn rgpd_score(version: ConsentVersion, cmp_names: &[String]) -> u8 {
    let mut score: u8 = 0;

    if !cmp_names.is_empty() {
        score += 40;
    }

    score += match version {
        ConsentVersion::V2 => 20,
        ConsentVersion::V1 => 10,
        ConsentVersion::None => 0,
    };

    score.min(100)
}
