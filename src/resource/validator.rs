//! Structural validation of inbound payloads.
//!
//! Validators only reject missing mandatory fields and optional fields that
//! were supplied with an empty value. Absent optional fields are fine.

use serde_json::{Map, Value};

use crate::error::{AgsError, AgsResult};

/// Optional line item fields that must carry a value when supplied.
const NON_EMPTY_WHEN_PRESENT: [&str; 5] = [
    "startDateTime",
    "endDateTime",
    "tag",
    "resourceId",
    "resourceLinkId",
];

/// Decode a request body into a JSON object.
pub fn parse_payload(body: &[u8]) -> AgsResult<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body).map_err(|e| AgsError::MalformedInput {
        message: format!("Invalid JSON payload: {}", e),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AgsError::validation("Payload must be a JSON object")),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn require_present(data: &Map<String, Value>, field: &str) -> AgsResult<()> {
    match data.get(field) {
        Some(value) if !value.is_null() => Ok(()),
        _ => Err(AgsError::validation(format!(
            "Missing mandatory field '{}'",
            field
        ))),
    }
}

/// Rules for line item creation and replacement.
pub fn validate_line_item(data: &Map<String, Value>) -> AgsResult<()> {
    require_present(data, "scoreMaximum")?;
    require_present(data, "label")?;

    for field in NON_EMPTY_WHEN_PRESENT {
        if let Some(value) = data.get(field)
            && is_empty_value(value)
        {
            return Err(AgsError::validation(format!(
                "Field '{}' must not be empty when provided",
                field
            )));
        }
    }

    match data.get("scoreMaximum").and_then(Value::as_f64) {
        Some(max) if max > 0.0 => {}
        _ => {
            return Err(AgsError::validation(
                "Field 'scoreMaximum' must be a number greater than 0",
            ));
        }
    }

    match data.get("label").and_then(Value::as_str) {
        Some(label) if !label.is_empty() => Ok(()),
        _ => Err(AgsError::validation(
            "Field 'label' must be a non-empty string",
        )),
    }
}

/// Rules for score publication.
pub fn validate_score(data: &Map<String, Value>) -> AgsResult<()> {
    require_present(data, "userId")
}
