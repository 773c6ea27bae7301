//! Parsing orchestrator: answer text in, bounded non-empty record list out.
//!
//! Flow: segments() → extract_record() → is_valid_candidate() → collect
//! (max 10) → fallback if empty → truncate (max 8).
//!
//! Pure and synchronous. It never returns an error: every failure mode
//! collapses into "nothing found", which selects the fallback catalog.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

use crate::scholarships::catalog::fallback_catalog;
use crate::scholarships::extractors::extract_record;
use crate::scholarships::models::ScholarshipRecord;
use crate::scholarships::segmenter::segments;
use crate::scholarships::validator::is_valid_candidate;

/// Accepted candidates stop being collected at this count.
pub const MAX_CANDIDATES: usize = 10;
/// Records returned to the caller never exceed this count.
pub const MAX_RESULTS: usize = 8;
/// Larger answers are not scanned at all.
pub const MAX_INPUT_BYTES: usize = 256 * 1024;

#[derive(Debug, Error)]
enum ParseError {
    #[error("answer is {len} bytes, limit is {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("extraction panicked")]
    Panicked,
}

/// Where the returned records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Extracted,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub scholarships: Vec<ScholarshipRecord>,
    pub source: ResultSource,
}

/// Converts a free-text completion answer into 1–8 scholarship records.
pub fn parse_scholarships(text: &str) -> ParseOutcome {
    let accepted = match collect_guarded(text) {
        Ok(records) => records,
        Err(e) => {
            warn!("Scholarship extraction failed, using fallback catalog: {e}");
            Vec::new()
        }
    };

    let (mut scholarships, source) = if accepted.is_empty() {
        (fallback_catalog(), ResultSource::Fallback)
    } else {
        (accepted, ResultSource::Extracted)
    };
    scholarships.truncate(MAX_RESULTS);

    ParseOutcome {
        scholarships,
        source,
    }
}

fn collect_guarded(text: &str) -> Result<Vec<ScholarshipRecord>, ParseError> {
    if text.len() > MAX_INPUT_BYTES {
        return Err(ParseError::InputTooLarge {
            len: text.len(),
            max: MAX_INPUT_BYTES,
        });
    }
    panic::catch_unwind(AssertUnwindSafe(|| collect_candidates(text)))
        .map_err(|_| ParseError::Panicked)
}

fn collect_candidates(text: &str) -> Vec<ScholarshipRecord> {
    let mut accepted = Vec::with_capacity(MAX_CANDIDATES);

    for segment in segments(text) {
        if accepted.len() >= MAX_CANDIDATES {
            break;
        }

        let candidate = extract_record(segment);
        if is_valid_candidate(&candidate) {
            accepted.push(candidate);
        } else {
            debug!("Rejected candidate '{}'", candidate.name);
        }
    }

    accepted
}
