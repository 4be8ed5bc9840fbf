//! Turns an untyped request body into a [`CreatePost`].
//!
//! Total over every JSON value: anything that is not an object with string
//! `title` and `content` fails with per-field messages instead of erroring
//! some other way. Extra fields, including any client-supplied `author`,
//! are ignored.

use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::CreatePost;

pub fn validate_payload(payload: &Value) -> Result<CreatePost, ValidationErrors> {
    let empty = Map::new();
    let object = payload.as_object().unwrap_or(&empty);

    let mut shape_errors = ValidationErrors::new();
    let title = string_field(object, "title", "Title", &mut shape_errors);
    let content = string_field(object, "content", "Content", &mut shape_errors);

    let candidate = CreatePost {
        title: title.map(|t| t.trim().to_string()).unwrap_or_default(),
        content: content.map(str::to_string).unwrap_or_default(),
    };

    let mut errors = candidate.validate().err().unwrap_or_default();
    // A missing or mistyped field reports that, not a length error.
    for (field, kind) in shape_errors.into_errors() {
        errors.errors_mut().insert(field, kind);
    }

    if errors.is_empty() {
        Ok(candidate)
    } else {
        Err(errors)
    }
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match object.get(key) {
        Some(Value::String(s)) => Some(s),
        None | Some(Value::Null) => {
            errors.add(key, field_error("required", format!("{label} is required")));
            None
        }
        Some(_) => {
            errors.add(key, field_error("type", format!("{label} must be a string")));
            None
        }
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
