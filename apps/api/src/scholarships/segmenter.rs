//! Segmenter: splits a free-text completion answer into candidate segments,
//! one per hypothesized scholarship.
//!
//! Splits happen at the *start* of each boundary marker, so the marker stays
//! at the head of the segment it opens (extractors key off `1.`, `##`, `**`).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::scholarships::models::ScholarshipRecord;

/// Segments shorter than this (in chars, after trimming) are greeting text or
/// empty headers and never reach the extractors.
pub const MIN_SEGMENT_CHARS: usize = 50;

/// One way a new list entry can start.
struct BoundaryRule {
    regex: Regex,
    /// Receives the text from the match start to the end of its line.
    opens_entry: fn(&str) -> bool,
}

static FIELD_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[ \t]+([A-Za-z /]{2,30}):").expect("valid regex"));

/// `**Amount:**` or `**Amount**:`
static BOLD_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*([A-Za-z /]{2,30})(?::\*\*|\*\*[ \t]*:)").expect("valid regex")
});

static BOUNDARY_RULES: LazyLock<Vec<BoundaryRule>> = LazyLock::new(|| {
    let rule = |pattern: &str, opens_entry: fn(&str) -> bool| BoundaryRule {
        regex: Regex::new(pattern).expect("valid regex"),
        opens_entry,
    };
    vec![
        // 1. Title
        rule(r"(?m)^[ \t]*\d{1,2}\.[ \t]+", |_| true),
        // ## Title
        rule(r"(?m)^[ \t]*#{1,6}[ \t]+", |_| true),
        // **Title** (`**Amount:**` is a field, not an entry)
        rule(r"\*\*[A-Z]", bold_opens_entry),
        // Capitalized line naming an instrument
        rule(
            r"(?m)^[A-Z][A-Za-z '&()-]{0,80}(?:Scholarship|Grant|Fellowship|Award|Scheme)",
            |_| true,
        ),
        // - Title (top-level only; `- Amount: ...` is a field, not an entry)
        rule(r"(?m)^-[ \t]+[A-Z]", bullet_opens_entry),
    ]
});

fn bullet_opens_entry(line: &str) -> bool {
    label_opens_entry(&FIELD_LABEL_RE, line)
}

fn bold_opens_entry(line: &str) -> bool {
    label_opens_entry(&BOLD_LABEL_RE, line)
}

/// Unlabelled markers always open an entry; labelled ones only when the
/// label itself names an instrument.
fn label_opens_entry(label_re: &Regex, line: &str) -> bool {
    match label_re.captures(line) {
        Some(caps) => ScholarshipRecord::contains_domain_keyword(&caps[1]),
        None => true,
    }
}

/// Yields the segments of `text` in document order.
///
/// Boundaries are found up front in one scan; slicing and the length filter
/// run as the iterator advances.
pub fn segments(text: &str) -> Segments<'_> {
    Segments {
        text,
        boundaries: boundary_offsets(text),
        next_index: 0,
    }
}

/// Iterator over the candidate segments of one answer.
pub struct Segments<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
    next_index: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text: &'a str = self.text;
        while self.next_index < self.boundaries.len() {
            let start = self.boundaries[self.next_index];
            let end = self
                .boundaries
                .get(self.next_index + 1)
                .copied()
                .unwrap_or(text.len());
            self.next_index += 1;

            let segment = text[start..end].trim();
            if segment.chars().count() >= MIN_SEGMENT_CHARS {
                return Some(segment);
            }
        }
        None
    }
}

/// Sorted split offsets, always starting at 0.
///
/// A boundary is dropped when only marker characters separate it from the
/// previous one, so `1. **Title**` opens a single segment.
fn boundary_offsets(text: &str) -> Vec<usize> {
    let mut starts = BTreeSet::new();
    starts.insert(0);

    for rule in BOUNDARY_RULES.iter() {
        for m in rule.regex.find_iter(text) {
            let line_end = text[m.start()..]
                .find('\n')
                .map_or(text.len(), |i| m.start() + i);
            if (rule.opens_entry)(&text[m.start()..line_end]) {
                starts.insert(m.start());
            }
        }
    }

    let mut kept: Vec<usize> = Vec::with_capacity(starts.len());
    for start in starts {
        match kept.last() {
            Some(&prev) if !text[prev..start].chars().any(char::is_alphabetic) => {}
            _ => kept.push(start),
        }
    }
    kept
}
