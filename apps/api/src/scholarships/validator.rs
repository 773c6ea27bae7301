//! Segment validator: decides whether a candidate looks like a real scholarship.
//!
//! Rejection is the common case (preambles, closing advice, field fragments)
//! and is not an error.

use crate::scholarships::models::ScholarshipRecord;

const NAME_CHARS: std::ops::RangeInclusive<usize> = 8..=200;

/// Phrases that mean the extractor captured a sentence introducing a list.
const LIST_INTRO_PHRASES: &[&str] = &["here are", "following"];

/// Accepts a candidate only if its name is a bounded, keyword-bearing title.
pub fn is_valid_candidate(candidate: &ScholarshipRecord) -> bool {
    let name = candidate.name.trim();
    if !NAME_CHARS.contains(&name.chars().count()) {
        return false;
    }

    let lower = name.to_lowercase();
    if LIST_INTRO_PHRASES.iter().any(|p| lower.contains(p)) {
        return false;
    }

    ScholarshipRecord::contains_domain_keyword(name)
}
