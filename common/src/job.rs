use serde::{Deserialize, Serialize};

/// Placeholder company name for postings that omit one.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Placeholder for job type, work model, seniority and salary.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A normalized job posting.
///
/// Serialized with camelCase keys so the record round-trips through the
/// same wire shape the job source uses.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    #[serde(default = "unknown_company")]
    pub company: String,
    #[serde(default = "not_specified")]
    pub job_type: String,
    #[serde(default = "not_specified")]
    pub work_model: String,
    #[serde(default = "not_specified")]
    pub seniority_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<f64>,
    /// Display string derived from the salary bounds.
    #[serde(default = "not_specified")]
    pub salary: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn unknown_company() -> String {
    UNKNOWN_COMPANY.to_string()
}

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

impl Job {
    /// Creates a job with every optional field set to its placeholder.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: unknown_company(),
            job_type: not_specified(),
            work_model: not_specified(),
            seniority_level: not_specified(),
            min_salary: None,
            max_salary: None,
            salary: not_specified(),
            locations: Vec::new(),
            tags: Vec::new(),
        }
    }
}
