//! Validation error types

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Validation error for inbound payloads.
///
/// Only the first violation found is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not a JSON object
    NotAnObject,

    /// Required field is absent
    Missing { field: &'static str },

    /// Field is present but not a string (null included)
    NotAString { field: &'static str },

    /// Field is shorter than its minimum length
    TooShort { field: &'static str, min: usize },

    /// Body could not be read as JSON at all
    MalformedBody { reason: String },
}

impl ValidationError {
    /// Name of the offending field, `body` for whole-payload failures.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotAnObject | Self::MalformedBody { .. } => "body",
            Self::Missing { field } | Self::NotAString { field } | Self::TooShort { field, .. } => {
                *field
            }
        }
    }

    /// Human readable message without the field prefix.
    pub fn message(&self) -> String {
        match self {
            Self::NotAnObject => "input should be a valid object".to_string(),
            Self::Missing { .. } => "field required".to_string(),
            Self::NotAString { .. } => "input should be a valid string".to_string(),
            Self::TooShort { field, .. } => format!("{} is too short", field),
            Self::MalformedBody { reason } => reason.clone(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { field, min } => {
                write!(f, "{} is too short (minimum {} characters)", field, min)
            }
            other => write!(f, "{}: {}", other.field(), other.message()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Serialized as `{"field": ..., "message": ...}` inside the error envelope.
impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("field", self.field())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
