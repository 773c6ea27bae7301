//! Field extractors: turn one segment into a candidate `ScholarshipRecord`.
//!
//! Each field owns an ordered table of `(regex, capture group)` pairs. The
//! first capture that survives the field's acceptance check wins; if none
//! does, the field gets its literal default. Extraction never fails.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::scholarships::models::{ScholarshipRecord, CANONICAL_PORTAL_URL};

pub const DEFAULT_NAME: &str = "Educational Opportunity";
pub const DEFAULT_AMOUNT: &str = "Amount varies";
pub const DEFAULT_ELIGIBILITY: &str = "Check official website for detailed eligibility criteria";
pub const DEFAULT_DEADLINE: &str = "Check official website for current deadlines";
pub const DEFAULT_DESCRIPTION: &str =
    "Financial assistance program for students pursuing higher education in India.";

const NAME_CHARS: std::ops::RangeInclusive<usize> = 10..=150;
const DESCRIPTION_SENTENCE_CHARS: std::ops::RangeInclusive<usize> = 40..=200;
const DESCRIPTION_SENTENCES: usize = 2;

/// Sentences echoing the prompt's field labels are not descriptions.
const DESCRIPTION_BOILERPLATE: &[&str] = &[
    "scholarship name",
    "eligibility criteria",
    "application deadline",
];

/// One entry in a field's ordered pattern table.
pub struct FieldPattern {
    regex: Regex,
    group: usize,
}

impl FieldPattern {
    fn new(pattern: &str, group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("valid regex"),
            group,
        }
    }

    fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }
}

/// Walks `patterns` in order and returns the first capture `accept` keeps.
fn first_match<F>(patterns: &[FieldPattern], text: &str, accept: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    patterns
        .iter()
        .filter_map(|p| p.capture(text))
        .find_map(accept)
}

// ────────────────────────────────────────────────────────────────────────────
// Pattern tables
// ────────────────────────────────────────────────────────────────────────────

// Money amount with an optional unit suffix kept verbatim.
const MONEY: &str = r"[\d,]+(?:\.\d+)?(?:\s*(?:lakhs?|crores?|per\s+year|per\s+month|per\s+annum|annually|monthly))?";

// Bare domain with optional path, e.g. `scholarships.gov.in/fresh`.
const BARE_DOMAIN: &str = r"((?:www\.)?[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+(?:/[^\s<>()\[\]*]*)?)";

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static NAME_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        // `1. **Title Scholarship**` / `## Title Scholarship`
        FieldPattern::new(
            r"(?m)^[ \t]*(?:\d{1,2}\.|#{1,6})[ \t]*(?:\*\*)?[ \t]*([^\n*:]{3,140}(?i:scholarships?|grants?|fellowships?|awards?|schemes?))\b",
            1,
        ),
        // Standalone capitalized phrase ending in a keyword
        FieldPattern::new(
            r"\b([A-Z][A-Za-z '&-]{2,48}(?:Scholarships?|Grants?|Fellowships?|Awards?|Schemes?))\b",
            1,
        ),
        // Any capitalized line
        FieldPattern::new(r"(?m)^[ \t]*(?:\*\*)?([A-Z][^\n]{9,99})$", 1),
    ]
});

static AMOUNT_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(&format!(r"(?i)₹\s*{MONEY}"), 0),
        FieldPattern::new(&format!(r"(?i)\bRs\.?\s*{MONEY}"), 0),
        FieldPattern::new(&format!(r"(?i)\bINR\s*{MONEY}"), 0),
        FieldPattern::new(&format!(r"(?i)\bup\s+to\s+₹\s*{MONEY}"), 0),
        FieldPattern::new(&format!(r"(?i)\bamount\s*:\s*(₹\s*{MONEY})"), 1),
    ]
});

static ELIGIBILITY_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(r"(?i)\beligibility(?:\s+criteria)?\s*:\s*([^.\n]{20,150})", 1),
        FieldPattern::new(r"(?i)\beligible\s*:\s*([^.\n]{20,150})", 1),
        FieldPattern::new(r"(?i)\bcriteria\s*:\s*([^.\n]{20,150})", 1),
        FieldPattern::new(r"(?i)\brequirements\s*:\s*([^.\n]{20,150})", 1),
        FieldPattern::new(r"(?i)\b(for\s+[^.\n]{3,100}?\b(?:students|candidates))\b", 1),
    ]
});

static DEADLINE_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(r"(?i)\b(?:application\s+)?deadline\s*:\s*([^\n]{3,60})", 1),
        FieldPattern::new(r"(?i)\bdue\s+by\s*:?\s*([^\n]{3,60})", 1),
        FieldPattern::new(r"(?i)\bapply\s+by\s*:\s*([^\n]{3,60})", 1),
        FieldPattern::new(r"(?i)\blast\s+date\s*:\s*([^\n]{3,60})", 1),
        FieldPattern::new(
            &format!(r"(?i)\b((?:{MONTHS})\s+(?:\d{{1,2}}(?:st|nd|rd|th)?,?\s+)?(?:2025|2026))\b"),
            1,
        ),
        FieldPattern::new(r"\b(\d{1,2}[/-]\d{1,2}[/-](?:2025|2026))\b", 1),
        FieldPattern::new(r"(?i)\b((?:2025|2026)\s+deadline)\b", 1),
    ]
});

static LINK_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(r#"https?://[^\s<>()\[\]"'*]+"#, 0),
        FieldPattern::new(&format!(r"(?i)\b(?:website|portal|apply)\s*:\s*{BARE_DOMAIN}"), 1),
        FieldPattern::new(&format!(r"(?i)\b(?:visit|check)\s*:?\s*{BARE_DOMAIN}"), 1),
    ]
});

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("valid regex"));

// ────────────────────────────────────────────────────────────────────────────
// Extractors
// ────────────────────────────────────────────────────────────────────────────

/// Builds an unvalidated candidate from one segment.
pub fn extract_record(segment: &str) -> ScholarshipRecord {
    ScholarshipRecord {
        name: extract_name(segment),
        amount: extract_amount(segment),
        eligibility: extract_eligibility(segment),
        deadline: extract_deadline(segment),
        description: extract_description(segment),
        link: extract_link(segment).unwrap_or_else(|| CANONICAL_PORTAL_URL.to_string()),
    }
}

pub fn extract_name(segment: &str) -> String {
    first_match(&NAME_PATTERNS, segment, |raw| {
        let cleaned = clean_value(raw);
        let name = strip_article(cleaned.trim_end_matches(':'));
        NAME_CHARS
            .contains(&name.chars().count())
            .then(|| name.to_string())
    })
    .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

pub fn extract_amount(segment: &str) -> String {
    first_match(&AMOUNT_PATTERNS, segment, |raw| non_empty(raw.trim_end_matches(',')))
        .unwrap_or_else(|| DEFAULT_AMOUNT.to_string())
}

pub fn extract_eligibility(segment: &str) -> String {
    first_match(&ELIGIBILITY_PATTERNS, segment, non_empty)
        .unwrap_or_else(|| DEFAULT_ELIGIBILITY.to_string())
}

pub fn extract_deadline(segment: &str) -> String {
    first_match(&DEADLINE_PATTERNS, segment, |raw| {
        non_empty(raw.trim_end_matches(['.', ',', ';']))
    })
    .unwrap_or_else(|| DEFAULT_DEADLINE.to_string())
}

/// First two prose sentences of acceptable length, ending in a period.
pub fn extract_description(segment: &str) -> String {
    let sentences: Vec<String> = SENTENCE_END_RE
        .split(segment)
        .map(clean_value)
        .filter(|s| DESCRIPTION_SENTENCE_CHARS.contains(&s.chars().count()))
        .filter(|s| {
            let lower = s.to_lowercase();
            !DESCRIPTION_BOILERPLATE.iter().any(|b| lower.contains(b))
        })
        .take(DESCRIPTION_SENTENCES)
        .collect();

    if sentences.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        format!("{}.", sentences.join(". "))
    }
}

/// First well-formed absolute URL in the segment, scheme added if missing.
pub fn extract_link(segment: &str) -> Option<String> {
    first_match(&LINK_PATTERNS, segment, normalize_url)
}

fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches(['.', ',', ';', ':', '!', '?']);
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).ok()?;
    let has_dotted_host = parsed.host_str().is_some_and(|h| h.contains('.'));
    (matches!(parsed.scheme(), "http" | "https") && has_dotted_host).then_some(candidate)
}

fn non_empty(raw: &str) -> Option<String> {
    let value = clean_value(raw);
    (!value.is_empty()).then_some(value)
}

/// Collapses whitespace and strips markdown emphasis and list punctuation.
fn clean_value(raw: &str) -> String {
    let collapsed = raw.replace("**", "").split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c == '-' || c == '#' || c == '*' || c.is_whitespace())
        .to_string()
}

fn strip_article(name: &str) -> &str {
    name.strip_prefix("The ")
        .or_else(|| name.strip_prefix("A "))
        .unwrap_or(name)
}
