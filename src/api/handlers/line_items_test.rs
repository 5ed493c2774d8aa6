//! Integration tests for line item endpoints.

use axum::http::{StatusCode, header};
use serde_json::json;

use super::test_support::*;
use crate::resource::{MEDIA_TYPE_LINE_ITEM, MEDIA_TYPE_LINE_ITEM_CONTAINER};

fn chapter(label: &str) -> serde_json::Value {
    json!({
        "scoreMaximum": 60,
        "label": label,
        "tag": "grade",
        "resourceLinkId": "rl-1"
    })
}

async fn create(app: &axum::Router, context: &str, body: serde_json::Value) -> serde_json::Value {
    let response = send(
        app,
        "POST",
        &format!("/{context}/lineitems"),
        Some(FULL_TOKEN),
        Some((MEDIA_TYPE_LINE_ITEM, body)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

// =============================================================================
// POST /{context}/lineitems
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_line_item_assigns_url_id() {
    let app = test_app();

    let body = create(&app, "ctx1", chapter("Chapter 1")).await;

    assert_eq!(body["id"], "http://localhost:3000/ctx1/lineitems/1");
    assert_eq!(body["label"], "Chapter 1");
    assert_eq!(body["scoreMaximum"], 60.0);
    assert_eq!(body["tag"], "grade");
    assert_eq!(body["resourceId"], "");
    assert!(body["startDateTime"].is_null());
    assert!(body.get("contextId").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_line_item_sets_media_type() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/ctx1/lineitems",
        Some(FULL_TOKEN),
        Some(("application/json; charset=utf-8", chapter("Chapter 1"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        Some(MEDIA_TYPE_LINE_ITEM)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_line_item_rejects_wrong_content_type() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/ctx1/lineitems",
        Some(FULL_TOKEN),
        Some(("text/plain", chapter("Chapter 1"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_line_item_rejects_invalid_payload() {
    let app = test_app();

    for body in [
        json!({ "label": "No maximum" }),
        json!({ "scoreMaximum": 0, "label": "Zero" }),
        json!({ "scoreMaximum": 10, "label": "" }),
        json!({ "scoreMaximum": 10, "label": "Empty tag", "tag": "" }),
        json!([1, 2]),
    ] {
        let response = send(
            &app,
            "POST",
            "/ctx1/lineitems",
            Some(FULL_TOKEN),
            Some((MEDIA_TYPE_LINE_ITEM, body.clone())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE, "{body}");

        let error = json_body(response).await;
        assert!(error["error"].as_str().is_some());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_line_item_requires_write_scope() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/ctx1/lineitems",
        Some(READ_ONLY_TOKEN),
        Some((MEDIA_TYPE_LINE_ITEM, chapter("Chapter 1"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn requests_without_token_are_unauthorized() {
    let app = test_app();

    let response = send(&app, "GET", "/ctx1/lineitems", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, "GET", "/ctx1/lineitems", Some("bogus"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// GET /{context}/lineitems
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_line_items_initially_empty() {
    let app = test_app();

    let response = send(&app, "GET", "/ctx1/lineitems", Some(READ_ONLY_TOKEN), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        Some(MEDIA_TYPE_LINE_ITEM_CONTAINER)
    );
    assert!(header_value(&response, header::LINK).is_none());
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_line_items_is_scoped_to_context() {
    let app = test_app();
    create(&app, "ctx1", chapter("Chapter 1")).await;
    create(&app, "ctx2", chapter("Other course")).await;

    let response = send(&app, "GET", "/ctx1/lineitems", Some(READ_ONLY_TOKEN), None).await;
    let body = json_body(response).await;

    let items = body.as_array().expect("Expected array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["label"], "Chapter 1");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_line_items_paginates_with_link_header() {
    let app = test_app();
    for n in 1..=3 {
        create(&app, "ctx1", chapter(&format!("Chapter {n}"))).await;
    }

    let response = send(
        &app,
        "GET",
        "/ctx1/lineitems?limit=2&tag=grade",
        Some(READ_ONLY_TOKEN),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::LINK),
        Some(r#"<http://localhost:3000/ctx1/lineitems?page=2&limit=2&tag=grade>; rel="next""#)
    );
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = send(
        &app,
        "GET",
        "/ctx1/lineitems?page=2&limit=2&tag=grade",
        Some(READ_ONLY_TOKEN),
        None,
    )
    .await;
    assert!(header_value(&response, header::LINK).is_none());
    let body = json_body(response).await;
    assert_eq!(body[0]["label"], "Chapter 3");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_line_items_filters_by_resource_link() {
    let app = test_app();
    create(&app, "ctx1", chapter("Linked")).await;
    create(&app, "ctx1", json!({ "scoreMaximum": 10, "label": "Unlinked" })).await;

    let response = send(
        &app,
        "GET",
        "/ctx1/lineitems?resource_link_id=rl-1",
        Some(READ_ONLY_TOKEN),
        None,
    )
    .await;
    let body = json_body(response).await;

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["label"], "Linked");
}

// =============================================================================
// GET / PUT / DELETE /{context}/lineitems/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_line_item_returns_stored_item() {
    let app = test_app();
    create(&app, "ctx1", chapter("Chapter 1")).await;

    let response = send(&app, "GET", "/ctx1/lineitems/1", Some(READ_ONLY_TOKEN), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["label"], "Chapter 1");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_line_item_missing_is_not_found() {
    let app = test_app();

    let response = send(&app, "GET", "/ctx1/lineitems/42", Some(READ_ONLY_TOKEN), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_line_item_replaces_fields_and_keeps_id() {
    let app = test_app();
    create(&app, "ctx1", chapter("Chapter 1")).await;

    let response = send(
        &app,
        "PUT",
        "/ctx1/lineitems/1",
        Some(FULL_TOKEN),
        Some((
            MEDIA_TYPE_LINE_ITEM,
            json!({
                "id": "http://elsewhere/ignored",
                "scoreMaximum": 100,
                "label": "Chapter 1 (revised)"
            }),
        )),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], "http://localhost:3000/ctx1/lineitems/1");
    assert_eq!(body["scoreMaximum"], 100.0);
    assert_eq!(body["tag"], "");

    let response = send(&app, "GET", "/ctx1/lineitems/1", Some(READ_ONLY_TOKEN), None).await;
    assert_eq!(json_body(response).await["label"], "Chapter 1 (revised)");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_line_item_is_not_found() {
    let app = test_app();

    let response = send(
        &app,
        "PUT",
        "/ctx1/lineitems/9",
        Some(FULL_TOKEN),
        Some((MEDIA_TYPE_LINE_ITEM, chapter("Ghost"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_line_item_removes_it() {
    let app = test_app();
    create(&app, "ctx1", chapter("Chapter 1")).await;

    let response = send(&app, "DELETE", "/ctx1/lineitems/1", Some(FULL_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/ctx1/lineitems/1", Some(READ_ONLY_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_line_item_requires_write_scope() {
    let app = test_app();
    create(&app, "ctx1", chapter("Chapter 1")).await;

    let response = send(&app, "DELETE", "/ctx1/lineitems/1", Some(READ_ONLY_TOKEN), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_needs_no_token() {
    let app = test_app();

    let response = send(&app, "GET", "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_line_items_rejects_malformed_paging_as_not_acceptable() {
    let app = test_app();

    for uri in ["/ctx1/lineitems?limit=abc", "/ctx1/lineitems?page=-1"] {
        let response = send(&app, "GET", uri, Some(FULL_TOKEN), None).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE, "{uri}");

        let error = json_body(response).await;
        assert!(
            error["error"]
                .as_str()
                .is_some_and(|e| e.contains("Invalid query string"))
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn list_line_items_checks_token_before_query_string() {
    let app = test_app();

    let response = send(&app, "GET", "/ctx1/lineitems?limit=abc", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, "GET", "/ctx1/lineitems?limit=abc", Some(SCORE_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
