//! Fallback catalog: well-known central government scholarships returned
//! whenever an answer yields no usable entries. Callers never see an empty list.

use crate::scholarships::models::ScholarshipRecord;

struct CatalogEntry {
    name: &'static str,
    amount: &'static str,
    eligibility: &'static str,
    deadline: &'static str,
    description: &'static str,
    link: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "National Scholarship Portal (NSP) Scholarships",
        amount: "₹10,000 - ₹50,000 per year",
        eligibility: "Indian students with family income below ₹2.5 lakh per annum",
        deadline: "October 31, 2025",
        description: "Single-window portal for central and state government scholarships covering pre-matric, post-matric and merit-based schemes.",
        link: "https://scholarships.gov.in",
    },
    CatalogEntry {
        name: "Post-Matric Scholarship for SC/ST Students",
        amount: "Full tuition fees + ₹1,200 monthly maintenance",
        eligibility: "SC/ST students with family income below ₹2.5 lakh per annum",
        deadline: "November 30, 2025",
        description: "Covers compulsory fees and a maintenance allowance for SC/ST students studying at post-matriculation level.",
        link: "https://socialjustice.gov.in",
    },
    CatalogEntry {
        name: "Merit-cum-Means Scholarship for Professional and Technical Courses",
        amount: "₹20,000 per year",
        eligibility: "Minority community students in professional courses with family income below ₹2.5 lakh",
        deadline: "October 31, 2025",
        description: "Supports meritorious students from minority communities pursuing technical and professional degrees.",
        link: "https://scholarships.gov.in",
    },
    CatalogEntry {
        name: "INSPIRE Scholarship for Higher Education (SHE)",
        amount: "₹80,000 per year",
        eligibility: "Top 1% in class XII boards pursuing BSc/MSc in natural and basic sciences",
        deadline: "December 31, 2025",
        description: "Department of Science and Technology scholarship that attracts talented students to careers in basic science research.",
        link: "https://online-inspire.gov.in",
    },
];

/// The catalog as owned records, in fixed order.
pub fn fallback_catalog() -> Vec<ScholarshipRecord> {
    CATALOG
        .iter()
        .map(|e| ScholarshipRecord {
            name: e.name.to_string(),
            amount: e.amount.to_string(),
            eligibility: e.eligibility.to_string(),
            deadline: e.deadline.to_string(),
            description: e.description.to_string(),
            link: e.link.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scholarships::validator::is_valid_candidate;

    #[test]
    fn test_catalog_order_is_fixed() {
        let names: Vec<String> = fallback_catalog().into_iter().map(|r| r.name).collect();
        assert_eq!(names.len(), 4);
        assert!(names[0].starts_with("National Scholarship Portal"));
        assert!(names[1].starts_with("Post-Matric"));
        assert!(names[2].starts_with("Merit-cum-Means"));
        assert!(names[3].starts_with("INSPIRE"));
    }

    #[test]
    fn test_catalog_entries_pass_validation() {
        for record in fallback_catalog() {
            assert!(is_valid_candidate(&record), "{} rejected", record.name);
            assert!(url::Url::parse(&record.link).is_ok());
        }
    }
}
