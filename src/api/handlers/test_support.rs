//! Shared fixtures for handler tests.

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{AppState, StaticTokenValidator, create_router};
use crate::repository::InMemoryGradebook;
use crate::scope::{SCOPE_LINE_ITEM, SCOPE_LINE_ITEM_READ_ONLY, SCOPE_RESULT_READ_ONLY, SCOPE_SCORE};

pub const BASE_URL: &str = "http://localhost:3000";
pub const FULL_TOKEN: &str = "full";
pub const READ_ONLY_TOKEN: &str = "readonly";
pub const SCORE_TOKEN: &str = "score";
pub const RESULTS_TOKEN: &str = "results";

/// Router over an empty in-memory gradebook.
pub fn test_app() -> Router {
    let tokens = StaticTokenValidator::default()
        .with_token(
            FULL_TOKEN,
            &[
                SCOPE_LINE_ITEM,
                SCOPE_SCORE,
                SCOPE_RESULT_READ_ONLY,
            ],
        )
        .with_token(READ_ONLY_TOKEN, &[SCOPE_LINE_ITEM_READ_ONLY])
        .with_token(SCORE_TOKEN, &[SCOPE_SCORE])
        .with_token(RESULTS_TOKEN, &[SCOPE_RESULT_READ_ONLY]);

    let state = AppState::new(InMemoryGradebook::new(BASE_URL), tokens, "/lineitems");
    create_router(state)
}

/// Send a request, optionally with a bearer token and a typed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<(&str, Value)>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some((content_type, json)) => {
            builder = builder.header(header::CONTENT_TYPE, content_type);
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Helper to parse JSON response body
pub async fn json_body(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
