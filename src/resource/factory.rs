//! Construction of typed resources from raw payload data.
//!
//! Factories are the single place where mandatory fields are enforced;
//! everything downstream can rely on them being present.

use chrono::DateTime;
use serde_json::{Map, Value};

use super::models::{
    ActivityProgress, AdditionalProperties, GradeResult, GradingProgress, LineItem, Score,
    Timestamp,
};
use crate::error::{AgsError, AgsResult};

/// Wire keys with a typed counterpart on [`GradeResult`].
const RESULT_KNOWN_KEYS: [&str; 6] = [
    "id",
    "scoreOf",
    "userId",
    "resultScore",
    "resultMaximum",
    "comment",
];

fn optional_string(data: &Map<String, Value>, key: &str) -> AgsResult<Option<String>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AgsError::validation(format!(
            "Field '{}' must be a string",
            key
        ))),
    }
}

fn required_string(data: &Map<String, Value>, key: &str) -> AgsResult<String> {
    optional_string(data, key)?.ok_or_else(|| AgsError::missing_field(key))
}

fn optional_number(data: &Map<String, Value>, key: &str) -> AgsResult<Option<f64>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(_) => Err(AgsError::validation(format!(
            "Field '{}' must be a number",
            key
        ))),
    }
}

/// Numeric strings and booleans (`1.0` / `0.0`) are accepted alongside
/// numbers. Strings that are not numbers are still refused.
fn coerced_number(data: &Map<String, Value>, key: &str) -> AgsResult<Option<f64>> {
    match data.get(key) {
        Some(Value::Bool(b)) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(AgsError::validation(format!(
                "Field '{}' is not numeric: '{}'",
                key, s
            ))),
        },
        _ => optional_number(data, key),
    }
}

fn optional_timestamp(data: &Map<String, Value>, key: &str) -> AgsResult<Option<Timestamp>> {
    optional_string(data, key)?
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw).map_err(|e| {
                AgsError::validation(format!(
                    "Field '{}' is not an ISO-8601 date: '{}' ({})",
                    key, raw, e
                ))
            })
        })
        .transpose()
}

fn optional_enum<T>(data: &Map<String, Value>, key: &str) -> AgsResult<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    optional_string(data, key)?
        .map(|raw| raw.parse::<T>().map_err(AgsError::validation))
        .transpose()
}

/// Build a line item belonging to `context_id`.
pub fn create_line_item(context_id: &str, data: &Map<String, Value>) -> AgsResult<LineItem> {
    let score_maximum =
        optional_number(data, "scoreMaximum")?.ok_or_else(|| AgsError::missing_field("scoreMaximum"))?;

    Ok(LineItem {
        context_id: context_id.to_string(),
        score_maximum,
        label: required_string(data, "label")?,
        id: optional_string(data, "id")?,
        start_date_time: optional_timestamp(data, "startDateTime")?,
        end_date_time: optional_timestamp(data, "endDateTime")?,
        tag: optional_string(data, "tag")?,
        resource_id: optional_string(data, "resourceId")?,
        resource_link_id: optional_string(data, "resourceLinkId")?,
    })
}

/// Build a score. Progress values default to `Initialized` / `NotReady` and
/// the timestamp to the current time.
pub fn create_score(data: &Map<String, Value>) -> AgsResult<Score> {
    Ok(Score {
        user_identifier: required_string(data, "userId")?,
        activity_progress: optional_enum::<ActivityProgress>(data, "activityProgress")?
            .unwrap_or_default(),
        grading_progress: optional_enum::<GradingProgress>(data, "gradingProgress")?
            .unwrap_or_default(),
        score_given: optional_number(data, "scoreGiven")?,
        score_maximum: optional_number(data, "scoreMaximum")?,
        comment: optional_string(data, "comment")?,
        timestamp: optional_timestamp(data, "timestamp")?
            .unwrap_or_else(|| chrono::Utc::now().fixed_offset()),
    })
}

/// Build a result. Keys outside the known set are kept verbatim in
/// `additional_properties`.
pub fn create_result(data: &Map<String, Value>) -> AgsResult<GradeResult> {
    let user_identifier = required_string(data, "userId")?;
    let line_item_identifier = required_string(data, "scoreOf")?;

    let additional_properties: AdditionalProperties = data
        .iter()
        .filter(|(key, _)| !RESULT_KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(GradeResult {
        user_identifier,
        line_item_identifier,
        id: optional_string(data, "id")?,
        result_score: coerced_number(data, "resultScore")?,
        result_maximum: coerced_number(data, "resultMaximum")?,
        comment: optional_string(data, "comment")?,
        additional_properties,
    })
}

