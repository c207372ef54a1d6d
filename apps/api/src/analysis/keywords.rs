//! Keyword matching — set algebra between resume tokens, job tokens, and a
//! fixed skill vocabulary.

use std::collections::BTreeSet;

use crate::models::analysis::KeywordSet;

/// Matches one vocabulary against the job and resume token sets.
///
/// `required` is the vocabulary intersected with the job tokens; `matched`
/// and `missing` split it by presence in the resume tokens.
///
/// Edge cases are deliberate and distinct:
/// - empty `required` (job mentions nothing from this vocabulary) scores
///   100 — nothing was asked for, so nothing is missing;
/// - non-empty `required` with no matches scores 0.
pub fn match_vocabulary(
    resume_tokens: &BTreeSet<String>,
    job_tokens: &BTreeSet<String>,
    vocabulary: &[&str],
) -> KeywordSet {
    let required: BTreeSet<String> = vocabulary
        .iter()
        .filter(|term| job_tokens.contains(**term))
        .map(|term| term.to_string())
        .collect();

    if required.is_empty() {
        return KeywordSet {
            matched: BTreeSet::new(),
            missing: BTreeSet::new(),
            coverage_percent: 100,
        };
    }

    let matched: BTreeSet<String> = required
        .iter()
        .filter(|term| resume_tokens.contains(*term))
        .cloned()
        .collect();
    let missing: BTreeSet<String> = required.difference(&matched).cloned().collect();

    let coverage_percent =
        ((matched.len() as f64 / required.len() as f64) * 100.0).round() as u32;

    KeywordSet {
        matched,
        missing,
        coverage_percent,
    }
}
