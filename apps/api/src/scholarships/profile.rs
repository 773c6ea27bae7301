//! Student profile: the search request body and the query built from it.

use serde::Deserialize;

use crate::errors::AppError;
use crate::scholarships::prompts::SEARCH_PROMPT_TEMPLATE;

/// Longest accepted value for any profile field, in chars.
const MAX_FIELD_CHARS: usize = 200;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub course: String,
    pub location: Option<String>,
    pub academic_standing: Option<String>,
    pub category: Option<String>,
    pub budget: Option<String>,
}

impl StudentProfile {
    /// Requires institution and course; bounds every field's length.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.institution.trim().is_empty() || self.course.trim().is_empty() {
            return Err(AppError::Validation(
                "Institution and course are required".to_string(),
            ));
        }

        let fields = [
            ("institution", Some(&self.institution)),
            ("course", Some(&self.course)),
            ("location", self.location.as_ref()),
            ("academicStanding", self.academic_standing.as_ref()),
            ("category", self.category.as_ref()),
            ("budget", self.budget.as_ref()),
        ];
        for (name, value) in fields {
            if value.is_some_and(|v| v.chars().count() > MAX_FIELD_CHARS) {
                return Err(AppError::Validation(format!(
                    "{name} must be at most {MAX_FIELD_CHARS} characters"
                )));
            }
        }

        Ok(())
    }

    /// Optional fields that carry a value, as `(label, value)` pairs.
    fn optional_details(&self) -> Vec<(&'static str, &str)> {
        [
            ("Location", self.location.as_deref()),
            ("Academic standing", self.academic_standing.as_deref()),
            ("Category", self.category.as_deref()),
            ("Budget / financial need", self.budget.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

/// Renders the natural-language query sent to the completion API.
pub fn build_search_query(profile: &StudentProfile) -> String {
    let mut lines = vec![
        format!("- Institution: {}", profile.institution.trim()),
        format!("- Course: {}", profile.course.trim()),
    ];
    lines.extend(
        profile
            .optional_details()
            .into_iter()
            .map(|(label, value)| format!("- {label}: {value}")),
    );

    SEARCH_PROMPT_TEMPLATE
        .replace("{institution}", profile.institution.trim())
        .replace("{course}", profile.course.trim())
        .replace("{profile_lines}", &lines.join("\n"))
}
