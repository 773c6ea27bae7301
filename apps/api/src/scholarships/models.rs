use serde::{Deserialize, Serialize};

/// Portal every record links to when the answer text carries no usable URL.
pub const CANONICAL_PORTAL_URL: &str = "https://scholarships.gov.in";

/// Tokens that mark a title as a funding instrument rather than prose.
pub const DOMAIN_KEYWORDS: &[&str] = &["scholarship", "grant", "fellowship", "award", "scheme"];

/// A single scholarship surfaced to the caller.
///
/// Built per request from extraction output (or copied from the fallback
/// catalog) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub name: String,
    pub amount: String,
    pub eligibility: String,
    pub deadline: String,
    pub description: String,
    pub link: String,
}

impl ScholarshipRecord {
    /// True when `text` mentions at least one funding keyword, ignoring case.
    pub fn contains_domain_keyword(text: &str) -> bool {
        let lower = text.to_lowercase();
        DOMAIN_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }
}
