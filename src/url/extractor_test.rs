//! Tests for the URL resource extractor.

use crate::error::AgsError;
use crate::url::*;

fn resource(context: Option<&str>, line_item: Option<&str>) -> ExtractedResource {
    ExtractedResource {
        context_id: context.map(String::from),
        line_item_id: line_item.map(String::from),
    }
}

#[test]
fn extracts_context_and_line_item_ignoring_trailing_segments() {
    let extracted = extract("/ctx/lineitems/42/scores", DEFAULT_SPLIT_TOKEN);
    assert_eq!(extracted, resource(Some("ctx"), Some("42")));
}

#[test]
fn path_without_split_token_yields_nothing() {
    assert_eq!(extract("/ctx", DEFAULT_SPLIT_TOKEN), resource(None, None));
    assert_eq!(extract("", DEFAULT_SPLIT_TOKEN), resource(None, None));
}

#[test]
fn trailing_slash_after_token_has_no_line_item() {
    let extracted = extract("/ctx/lineitems/", DEFAULT_SPLIT_TOKEN);
    assert_eq!(extracted, resource(Some("ctx"), None));
}

#[test]
fn context_is_last_segment_before_token() {
    let extracted = extract("/api/v1/course-7/lineitems/abc", DEFAULT_SPLIT_TOKEN);
    assert_eq!(extracted, resource(Some("course-7"), Some("abc")));
}

#[test]
fn token_at_start_has_no_context() {
    // Leading slash is trimmed first, so "/lineitems" is no longer present
    assert_eq!(extract("/lineitems/42", DEFAULT_SPLIT_TOKEN), resource(None, None));
    assert_eq!(extract("x//lineitems/42", DEFAULT_SPLIT_TOKEN), resource(None, Some("42")));
}

#[test]
fn custom_split_token() {
    let extracted = extract("/ctx/columns/9", "/columns");
    assert_eq!(extracted, resource(Some("ctx"), Some("9")));

    assert_eq!(extract("/ctx/lineitems/9", "/columns"), resource(None, None));
    assert_eq!(extract("/ctx/lineitems/9", ""), resource(None, None));
}

#[test]
fn only_first_token_occurrence_splits() {
    let extracted = extract("/a/lineitems/b/lineitems/c", DEFAULT_SPLIT_TOKEN);
    assert_eq!(extracted, resource(Some("a"), Some("b")));
}

#[test]
fn extract_from_url_uses_path_only() {
    let extracted =
        extract_from_url("https://lms.example.com/ctx/lineitems/7?type_id=1", DEFAULT_SPLIT_TOKEN)
            .unwrap();
    assert_eq!(extracted, resource(Some("ctx"), Some("7")));
}

#[test]
fn extract_from_url_rejects_relative_urls() {
    let err = extract_from_url("/ctx/lineitems/7", DEFAULT_SPLIT_TOKEN).unwrap_err();
    assert!(matches!(err, AgsError::MalformedUrl { .. }));
}
