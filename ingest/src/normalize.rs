//! Turns a raw job-source payload into validated `Job` records.

use std::collections::HashSet;

use common::{Job, NOT_SPECIFIED, UNKNOWN_COMPANY};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::{IngestError, Result};
use crate::payload::Payload;

/// Normalizes a whole response. Either every entry becomes a valid job with
/// a unique id, or the batch fails.
pub fn normalize(raw: Value) -> Result<Vec<Job>> {
    let payload = Payload::from_value(raw)?;
    debug!(shape = payload.shape(), "Normalizing job payload");

    let jobs = payload
        .into_entries()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(index, entry))
        .collect::<Result<Vec<_>>>()?;

    check_unique_ids(&jobs)?;
    Ok(jobs)
}

/// Converts one raw entry. A missing or empty `title` is fatal; every other
/// field falls back to a placeholder.
pub fn normalize_entry(index: usize, entry: Value) -> Result<Job> {
    let fields = match entry {
        Value::Object(fields) => fields,
        other => {
            warn!(index, entry = %other, "Job entry is not an object");
            return Err(IngestError::MissingTitle { index });
        }
    };

    let title = match fields.get("title") {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        _ => {
            warn!(index, entry = ?fields, "Job missing title");
            return Err(IngestError::MissingTitle { index });
        }
    };

    // Ids are random, so an id-less job gets a new one on every fetch.
    let id = identifier(fields.get("id")).unwrap_or_else(|| Uuid::new_v4().to_string());
    let min_salary = number(fields.get("minSalary"));
    let max_salary = number(fields.get("maxSalary"));

    Ok(Job {
        id,
        title,
        company: text_or(&fields, "company", UNKNOWN_COMPANY),
        job_type: text_or(&fields, "jobType", NOT_SPECIFIED),
        work_model: text_or(&fields, "workModel", NOT_SPECIFIED),
        seniority_level: text_or(&fields, "seniorityLevel", NOT_SPECIFIED),
        min_salary,
        max_salary,
        salary: format_salary(min_salary, max_salary),
        locations: string_list(fields.get("locations")),
        tags: string_list(fields.get("tags")),
    })
}

/// Fails naming every id that occurs more than once, each listed once.
pub fn check_unique_ids(jobs: &[Job]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for job in jobs {
        if !seen.insert(job.id.as_str()) && !duplicates.contains(&job.id) {
            duplicates.push(job.id.clone());
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        error!(?duplicates, "Duplicate job IDs found");
        Err(IngestError::DuplicateIds(duplicates))
    }
}

/// Builds the salary display string, e.g. `$50,000 - $80,000`.
/// A missing maximum mirrors the minimum.
pub fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    match min {
        Some(min) => {
            let max = max.unwrap_or(min);
            format!("${} - ${}", format_grouped(min), format_grouped(max))
        }
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Formats a number with comma thousands separators and at most three
/// fraction digits (`1234567.5` -> `1,234,567.5`).
pub fn format_grouped(value: f64) -> String {
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let text = format!("{rounded:.3}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Empty strings and zero count as no id.
fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

// `null` counts as absent and numeric strings are parsed, so "50000" is
// grouped like 50000.
fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn text_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => default.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
