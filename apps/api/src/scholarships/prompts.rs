// Prompt template for the scholarship search query.
// Shared fragments live in completion_client::prompts.

/// Search query template. Replace `{institution}`, `{course}` and
/// `{profile_lines}` before sending.
pub const SEARCH_PROMPT_TEMPLATE: &str = "Find scholarships currently available for an Indian student studying {course} at {institution}.

Student profile:
{profile_lines}

List up to 8 relevant scholarships, prioritising government schemes (central and state), \
institutional awards and reputable private foundations. Include application amounts in rupees, \
eligibility criteria, deadlines for 2025-2026, and the official website for each.";
