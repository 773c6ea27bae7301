// Cross-cutting prompt fragments shared by every completion request.

/// System prompt that steers the model toward a numbered, field-labelled list.
/// The parser tolerates deviations, but this layout extracts best.
pub const SCHOLARSHIP_SYSTEM: &str = "You are an expert advisor on scholarships for Indian students. \
    Answer with a numbered list of currently open scholarships. \
    For each one give the exact scholarship name on its own line, then the lines \
    'Amount:', 'Eligibility:', 'Deadline:' and 'Website:' followed by a one or two \
    sentence description. Prefer official government and institutional sources. \
    Use ₹ for amounts. Do not add greetings or closing remarks.";

/// Sampling temperature for search answers; low keeps the list layout stable.
pub const SEARCH_TEMPERATURE: f32 = 0.2;
