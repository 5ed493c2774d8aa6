//! Conversion of resources into their wire representation.
//!
//! Each normalizer builds its JSON object field by field so that presence
//! rules stay explicit. Non-finite numbers are refused since JSON cannot
//! carry them.

use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};

use super::models::{GradeResult, LineItem, LineItemContainer, ResultContainer, Score, Timestamp};
use crate::error::{AgsError, AgsResult};

/// ISO-8601 with explicit offset, e.g. `1988-12-22T00:00:00+00:00`.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn finite(field: &str, value: f64) -> AgsResult<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| AgsError::Serialization {
            message: format!("Non-finite value {} for field '{}'", value, field),
        })
}

fn optional_date(timestamp: Option<&Timestamp>) -> Value {
    timestamp
        .map(|ts| Value::String(format_timestamp(ts)))
        .unwrap_or(Value::Null)
}

fn string_or_empty(value: Option<&str>) -> Value {
    Value::String(value.unwrap_or_default().to_string())
}

/// Emits every line item key, absent strings as `""` and absent dates as
/// `null`.
pub fn normalize_line_item(line_item: &LineItem) -> AgsResult<Map<String, Value>> {
    let mut map = Map::new();
    map.insert("id".into(), string_or_empty(line_item.id.as_deref()));
    map.insert(
        "startDateTime".into(),
        optional_date(line_item.start_date_time.as_ref()),
    );
    map.insert(
        "endDateTime".into(),
        optional_date(line_item.end_date_time.as_ref()),
    );
    map.insert(
        "scoreMaximum".into(),
        finite("scoreMaximum", line_item.score_maximum)?,
    );
    map.insert("label".into(), Value::String(line_item.label.clone()));
    map.insert("tag".into(), string_or_empty(line_item.tag.as_deref()));
    map.insert(
        "resourceId".into(),
        string_or_empty(line_item.resource_id.as_deref()),
    );
    map.insert(
        "resourceLinkId".into(),
        string_or_empty(line_item.resource_link_id.as_deref()),
    );
    Ok(map)
}

/// `scoreGiven` and `scoreMaximum` are emitted as a pair or not at all;
/// `comment` only when non-empty.
pub fn normalize_score(score: &Score) -> AgsResult<Map<String, Value>> {
    let mut map = Map::new();
    map.insert(
        "userId".into(),
        Value::String(score.user_identifier.clone()),
    );
    map.insert(
        "timestamp".into(),
        Value::String(format_timestamp(&score.timestamp)),
    );
    map.insert(
        "activityProgress".into(),
        Value::String(score.activity_progress.to_string()),
    );
    map.insert(
        "gradingProgress".into(),
        Value::String(score.grading_progress.to_string()),
    );

    if let Some((given, maximum)) = score.score_pair() {
        map.insert("scoreGiven".into(), finite("scoreGiven", given)?);
        map.insert("scoreMaximum".into(), finite("scoreMaximum", maximum)?);
    }

    if let Some(comment) = score.comment.as_deref().filter(|c| !c.is_empty()) {
        map.insert("comment".into(), Value::String(comment.to_string()));
    }

    Ok(map)
}

/// Typed fields first, then additional properties in their original order.
pub fn normalize_result(result: &GradeResult) -> AgsResult<Map<String, Value>> {
    let mut map = Map::new();
    if let Some(id) = &result.id {
        map.insert("id".into(), Value::String(id.clone()));
    }
    map.insert(
        "userId".into(),
        Value::String(result.user_identifier.clone()),
    );
    map.insert(
        "scoreOf".into(),
        Value::String(result.line_item_identifier.clone()),
    );
    if let Some(score) = result.result_score {
        map.insert("resultScore".into(), finite("resultScore", score)?);
    }
    if let Some(maximum) = result.result_maximum {
        map.insert("resultMaximum".into(), finite("resultMaximum", maximum)?);
    }
    if let Some(comment) = result.comment.as_deref().filter(|c| !c.is_empty()) {
        map.insert("comment".into(), Value::String(comment.to_string()));
    }

    for (key, value) in &result.additional_properties {
        map.entry(key.clone()).or_insert_with(|| value.clone());
    }

    Ok(map)
}

/// The pagination link is not part of the body.
pub fn normalize_line_item_container(container: &LineItemContainer) -> AgsResult<Vec<Value>> {
    container
        .line_items()
        .iter()
        .map(|item| normalize_line_item(item).map(Value::Object))
        .collect()
}

pub fn normalize_result_container(container: &ResultContainer) -> AgsResult<Vec<Value>> {
    container
        .results()
        .iter()
        .map(|result| normalize_result(result).map(Value::Object))
        .collect()
}
