//! Request payload validation for posts.
//!
//! Validation never stops at the first problem: every field is checked and
//! all messages are collected into a [`ValidationErrors`] map keyed by field
//! name. Problems with the body itself (empty, not JSON, not an object) are
//! reported under the [`BODY`] key before any field is looked at.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::PostFields;

/// Error key used for problems with the request body as a whole.
pub const BODY: &str = "body";

pub const EMPTY_BODY: &str = "Request body is empty.";
pub const INVALID_JSON: &str = "Invalid JSON payload.";
pub const NOT_AN_OBJECT: &str = "JSON payload must be an object.";
pub const REQUIRED: &str = "This field is required.";
pub const NON_EMPTY_STRING: &str = "Must be a non-empty string.";
pub const TAGS_NOT_STRINGS: &str = "Tags must be an array of strings.";

pub const TITLE_MAX_CHARS: usize = 255;
pub const CATEGORY_MAX_CHARS: usize = 100;

/// Field name -> list of human-readable messages.
///
/// A field that is absent from the map had no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single body-level error.
    pub fn body(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(BODY, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, messages.join(" "))?;
            first = false;
        }
        Ok(())
    }
}

/// Decode a raw request body into a JSON object.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, ValidationErrors> {
    if body.is_empty() {
        return Err(ValidationErrors::body(EMPTY_BODY));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationErrors::body(NOT_AN_OBJECT)),
        Err(_) => Err(ValidationErrors::body(INVALID_JSON)),
    }
}

/// Check a decoded payload against the post schema.
pub fn validate_post(payload: &Map<String, Value>) -> Result<PostFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = text_field(payload, "title", Some(TITLE_MAX_CHARS), &mut errors);
    let content = text_field(payload, "content", None, &mut errors);
    let category = text_field(payload, "category", Some(CATEGORY_MAX_CHARS), &mut errors);
    let tags = tags_field(payload, &mut errors);

    match (title, content, category, tags) {
        (Some(title), Some(content), Some(category), Some(tags)) if errors.is_empty() => {
            Ok(PostFields {
                title,
                content,
                category,
                tags,
            })
        }
        _ => Err(errors),
    }
}

/// Parse and validate a request body in one step.
pub fn parse_post(body: &[u8]) -> Result<PostFields, ValidationErrors> {
    let payload = parse_payload(body)?;
    validate_post(&payload)
}

fn text_field(
    payload: &Map<String, Value>,
    field: &str,
    max_chars: Option<usize>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Some(value) = payload.get(field) else {
        errors.add(field, REQUIRED);
        return None;
    };

    let trimmed = match value.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            errors.add(field, NON_EMPTY_STRING);
            return None;
        }
    };

    if let Some(max) = max_chars
        && trimmed.chars().count() > max
    {
        errors.add(
            field,
            format!("Ensure this field has no more than {max} characters."),
        );
        return None;
    }

    Some(trimmed.to_string())
}

fn tags_field(payload: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    let Some(value) = payload.get("tags") else {
        errors.add("tags", REQUIRED);
        return None;
    };

    let tags = value.as_array().and_then(|items| {
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
    });

    if tags.is_none() {
        errors.add("tags", TAGS_NOT_STRINGS);
    }
    tags
}
