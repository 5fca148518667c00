//! Contact-form input validation
//!
//! The message body is checked against a small declared schema, field by
//! field in declaration order. Only the first failure is reported, as a
//! dotted field path plus a human-readable message.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::NewMessage;

/// First validation failure for a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    pub field: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRule {
    /// Non-empty string
    Text,
    /// Non-empty string that looks like an email address
    Email,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// Syntactic email check: local part without leading or doubled dots,
/// dotted domain ending in an alphabetic TLD.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_pattern().is_match(value)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_field<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    rule: FieldRule,
) -> Result<&'a str, ValidationIssue> {
    let text = match body.get(field) {
        None | Some(Value::Null) => return Err(ValidationIssue::new(field, "Required")),
        Some(Value::String(text)) => text.as_str(),
        Some(other) => {
            return Err(ValidationIssue::new(
                field,
                format!("Expected string, received {}", type_name(other)),
            ));
        }
    };

    if text.is_empty() {
        return Err(ValidationIssue::new(
            field,
            "String must contain at least 1 character(s)",
        ));
    }
    if rule == FieldRule::Email && !is_valid_email(text) {
        return Err(ValidationIssue::new(field, "Invalid email"));
    }
    Ok(text)
}

/// Validate a contact-form body into a [`NewMessage`].
///
/// Unknown fields are ignored.
pub fn validate_message(body: &Value) -> Result<NewMessage, ValidationIssue> {
    let Value::Object(map) = body else {
        return Err(ValidationIssue::new(
            "",
            format!("Expected object, received {}", type_name(body)),
        ));
    };

    // Checked in this order; the first failure wins
    let name = check_field(map, "name", FieldRule::Text)?;
    let email = check_field(map, "email", FieldRule::Email)?;
    let message = check_field(map, "message", FieldRule::Text)?;

    Ok(NewMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}
