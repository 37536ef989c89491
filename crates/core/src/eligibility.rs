//! Training eligibility matching.
//!
//! A training carries a free-text eligibility tag. [`matches`] decides
//! whether an employee qualifies for it by comparing the tag (or the keyword
//! family it names) against the employee's type, department and designation.
//! All comparisons are case-insensitive; the predicates are independent, so a
//! tag can match any number of employees.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tags that open a training to every active employee.
pub const OPEN_TAGS: &[&str] = &["all", "general"];

/// Tag naming the technical keyword family.
pub const TAG_TECHNICAL: &str = "technical";

/// Spellings accepted for the non-technical keyword family.
pub const TAGS_NON_TECHNICAL: &[&str] = &["non-technical", "non technical", "nontechnical"];

/// Keywords that mark an employee as technical staff.
///
/// Matched as plain substrings, not whole words: `"it"` also hits
/// "Facilities", "Security" and "Recruitment", so staff there count as
/// technical.
pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "it",
    "software",
    "engineer",
    "developer",
    "analyst",
    "architect",
    "technical",
    "programmer",
    "devops",
];

/// Keywords that mark an employee as non-technical staff.
pub const NON_TECHNICAL_KEYWORDS: &[&str] = &[
    "hr",
    "finance",
    "admin",
    "manager",
    "coordinator",
    "accounts",
    "operations",
    "sales",
    "marketing",
    "legal",
    "executive",
];

// ---------------------------------------------------------------------------
// EmployeeProfile
// ---------------------------------------------------------------------------

/// The employee attributes eligibility is decided on.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeProfile<'a> {
    pub employee_type: &'a str,
    pub department: &'a str,
    pub designation: &'a str,
}

impl EmployeeProfile<'_> {
    fn fields_lowercase(&self) -> [String; 3] {
        [
            self.employee_type.to_lowercase(),
            self.department.to_lowercase(),
            self.designation.to_lowercase(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// The rule a tag resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityRule {
    /// Everyone qualifies.
    Open,
    /// Any of [`TECHNICAL_KEYWORDS`] must appear.
    Technical,
    /// Any of [`NON_TECHNICAL_KEYWORDS`] must appear.
    NonTechnical,
    /// The (lower-cased, trimmed) tag itself must appear.
    Custom(String),
}

impl EligibilityRule {
    /// Resolve a raw tag. `None` and blank tags are [`EligibilityRule::Open`].
    pub fn from_tag(tag: Option<&str>) -> Self {
        let normalized = tag.map(|t| t.trim().to_lowercase()).unwrap_or_default();

        if normalized.is_empty() || OPEN_TAGS.contains(&normalized.as_str()) {
            Self::Open
        } else if normalized == TAG_TECHNICAL {
            Self::Technical
        } else if TAGS_NON_TECHNICAL.contains(&normalized.as_str()) {
            Self::NonTechnical
        } else {
            Self::Custom(normalized)
        }
    }

    /// Evaluate the rule against one employee.
    pub fn admits(&self, employee: &EmployeeProfile<'_>) -> bool {
        match self {
            Self::Open => true,
            Self::Technical => any_field_contains(employee, TECHNICAL_KEYWORDS),
            Self::NonTechnical => any_field_contains(employee, NON_TECHNICAL_KEYWORDS),
            Self::Custom(tag) => employee
                .fields_lowercase()
                .iter()
                .any(|field| field.contains(tag.as_str())),
        }
    }
}

/// Whether `employee` qualifies for a training tagged `tag`.
pub fn matches(tag: Option<&str>, employee: &EmployeeProfile<'_>) -> bool {
    EligibilityRule::from_tag(tag).admits(employee)
}

fn any_field_contains(employee: &EmployeeProfile<'_>, keywords: &[&str]) -> bool {
    employee
        .fields_lowercase()
        .iter()
        .any(|field| keywords.iter().any(|kw| field.contains(kw)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
