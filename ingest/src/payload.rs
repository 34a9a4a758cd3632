use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

/// The top-level response shapes the job source is known to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{ "jobs": [...] }`
    Wrapped(Vec<Value>),
    /// `[...]`
    List(Vec<Value>),
    /// A single job object.
    Single(Map<String, Value>),
}

impl Payload {
    /// Classifies a raw response. An object whose `jobs` field is not an
    /// array counts as a single job; scalars and `null` are rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut map) => match map.remove("jobs") {
                Some(Value::Array(jobs)) => Ok(Payload::Wrapped(jobs)),
                Some(other) => {
                    map.insert("jobs".to_string(), other);
                    Ok(Payload::Single(map))
                }
                None => Ok(Payload::Single(map)),
            },
            Value::Array(items) => Ok(Payload::List(items)),
            other => Err(IngestError::UnsupportedShape(kind(&other))),
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Payload::Wrapped(_) => "wrapped",
            Payload::List(_) => "list",
            Payload::Single(_) => "single",
        }
    }

    pub fn into_entries(self) -> Vec<Value> {
        match self {
            Payload::Wrapped(jobs) | Payload::List(jobs) => jobs,
            Payload::Single(map) => vec![Value::Object(map)],
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
