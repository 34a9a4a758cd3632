//! Application form input, validation and the submission result types.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("phone pattern compiles"));

/// Length of a fully formatted `(123) 456-7890` number.
const FORMATTED_PHONE_LEN: usize = 14;

/// Raw form input as typed by the applicant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub reason: String,
}

/// Validated application details. `contact` holds digits only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Submitted,
    Review,
    Rejected,
}

/// What the submission service answers for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub application_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Contact,
    Reason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every field that failed validation, at most one message per field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("application form is invalid: {}", join_messages(.errors))]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormErrors {
    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

impl ApplicationForm {
    /// Checks every field and returns the submittable data.
    pub fn validate(&self) -> Result<ApplicationData, FormErrors> {
        let mut errors = Vec::new();
        let mut check = |field, result: Result<(), &'static str>| {
            if let Err(message) = result {
                errors.push(FieldError { field, message });
            }
        };

        check(FormField::Name, required(&self.name, "Name is required"));
        check(FormField::Email, validate_email(&self.email));
        check(FormField::Contact, validate_contact(&self.contact));
        check(
            FormField::Reason,
            required(&self.reason, "Please provide a reason"),
        );

        if !errors.is_empty() {
            return Err(FormErrors { errors });
        }

        Ok(ApplicationData {
            name: self.name.clone(),
            email: self.email.clone(),
            contact: digits(&format_phone_number(&self.contact)),
            reason: self.reason.clone(),
        })
    }
}

fn required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    required(email, "Email is required")?;
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email");
    }
    Ok(())
}

/// Checks the contact as the form shows it, i.e. after `format_phone_number`.
fn validate_contact(raw: &str) -> Result<(), &'static str> {
    required(raw, "Contact is required")?;
    let contact = format_phone_number(raw);
    if contact.chars().count() < FORMATTED_PHONE_LEN {
        return Err("Phone number must be at least 10 digits");
    }
    if !PHONE_RE.is_match(&contact) {
        return Err("Phone number must be in (123) 456-7890 format");
    }
    Ok(())
}

fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformats phone input as it is typed: `123`, `(123) 45`, `(123) 456-7890`.
/// Digits past the tenth are dropped.
pub fn format_phone_number(input: &str) -> String {
    let cleaned = digits(input);
    match cleaned.len() {
        0..=3 => cleaned,
        4..=6 => format!("({}) {}", &cleaned[..3], &cleaned[3..]),
        len => format!(
            "({}) {}-{}",
            &cleaned[..3],
            &cleaned[3..6],
            &cleaned[6..len.min(10)]
        ),
    }
}
