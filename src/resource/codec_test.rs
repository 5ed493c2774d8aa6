//! Tests for the JSON codec.

use serde_json::json;

use crate::error::AgsError;
use crate::resource::*;

#[test]
fn encoding_non_finite_score_fails_with_description() {
    let mut score = Score::new("u");
    score.score_given = Some(f64::NAN);
    score.score_maximum = Some(10.0);

    match serialize(&score).unwrap_err() {
        AgsError::Serialization { message } => {
            assert!(message.contains("scoreGiven"), "unexpected message: {message}")
        }
        other => panic!("expected serialization error, got {other:?}"),
    }
}

#[test]
fn decoding_truncated_json_fails_with_syntax_error() {
    let err = deserialize::<serde_json::Value>("{").unwrap_err();
    match err {
        AgsError::MalformedInput { message } => assert!(message.contains("EOF")),
        other => panic!("expected malformed input, got {other:?}"),
    }
}

#[test]
fn score_roundtrips_through_json() {
    let mut score = Score::new("u-42");
    score.score_given = Some(7.5);
    score.score_maximum = Some(10.0);
    score.comment = Some("Good".into());
    score.activity_progress = ActivityProgress::Submitted;
    score.grading_progress = GradingProgress::PendingManual;

    let json = serialize(&score).unwrap();
    assert_eq!(deserialize::<Score>(&json).unwrap(), score);
    assert_eq!(deserialize_score(&json).unwrap(), score);
}

#[test]
fn result_roundtrips_through_json() {
    let mut result = GradeResult::new("u", "https://lms.example.com/ctx/lineitems/1");
    result.id = Some("https://lms.example.com/ctx/lineitems/1/results/u".into());
    result.result_score = Some(0.5);
    result.result_maximum = Some(1.0);
    result
        .additional_properties
        .insert("x-vendor".into(), json!({"late": true}));

    let json = serialize(&result).unwrap();
    assert_eq!(deserialize::<GradeResult>(&json).unwrap(), result);
    assert_eq!(deserialize_result(&json).unwrap(), result);
}

#[test]
fn deserialize_score_surfaces_missing_user() {
    let err = deserialize_score(r#"{"scoreGiven": 1}"#).unwrap_err();
    assert!(matches!(err, AgsError::MissingField { field } if field == "userId"));
}

#[test]
fn deserialize_score_reports_parse_diagnostic() {
    let err = deserialize_score(r#"{"userId": }"#).unwrap_err();
    match err {
        AgsError::MalformedInput { message } => assert!(message.contains("line 1")),
        other => panic!("expected malformed input, got {other:?}"),
    }
}

#[test]
fn line_item_serializes_as_wire_object() {
    let item = LineItem::new("ctx", 10.0, "Quiz");
    let json = serialize(&item).unwrap();
    let decoded = deserialize_line_item(&json, "ctx").unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn containers_serialize_as_arrays() {
    let container = LineItemContainer::new(vec![LineItem::new("ctx", 1.0, "A")], None);
    let value: serde_json::Value = deserialize(&serialize(&container).unwrap()).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["label"], json!("A"));
}
