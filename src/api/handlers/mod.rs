//! Request handlers and the helpers they share.

mod line_items;
mod results;
mod scores;
mod system;

#[cfg(test)]
mod line_items_test;
#[cfg(test)]
mod test_support;

pub use line_items::*;
pub use results::*;
pub use scores::*;
pub use system::*;

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::header::{CONTENT_TYPE, LINK};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::error::ApiError;
use crate::error::AgsError;
use crate::url::{ExtractedResource, extract, format_next_link};

/// Context and line item ids addressed by a request.
pub(crate) struct ResourcePath {
    context_id: String,
    line_item_id: Option<String>,
}

impl ResourcePath {
    /// Extract from the original request URI; a context id is mandatory.
    pub(crate) fn from_uri(uri: &Uri, split_token: &str) -> Result<Self, ApiError> {
        let ExtractedResource {
            context_id,
            line_item_id,
        } = extract(uri.path(), split_token);

        let context_id = context_id.ok_or(ApiError::InvalidPath {
            segment: "context id",
        })?;
        Ok(Self {
            context_id,
            line_item_id,
        })
    }

    pub(crate) fn context_id(&self) -> &str {
        &self.context_id
    }

    pub(crate) fn line_item_id(&self) -> Result<&str, ApiError> {
        self.line_item_id.as_deref().ok_or(ApiError::InvalidPath {
            segment: "line item id",
        })
    }
}

/// Unwrap query parameters extracted leniently, so a malformed query string
/// is reported as a payload error once the caller is authorized.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        AgsError::validation(format!("Invalid query string: {}", rejection.body_text())).into()
    })
}

/// Accepts the resource's media type or plain JSON, ignoring parameters.
pub(crate) fn require_content_type(headers: &HeaderMap, media_type: &str) -> Result<(), ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    if essence.eq_ignore_ascii_case(media_type) || essence.eq_ignore_ascii_case("application/json")
    {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType {
            content_type: content_type.to_string(),
        })
    }
}

/// 200 response with a JSON body of the given media type and an optional
/// `Link: <..>; rel="next"` header.
pub(crate) fn resource_response(
    media_type: &'static str,
    body: String,
    next_link: Option<&str>,
) -> Result<Response, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(media_type));

    if let Some(link) = next_link {
        let value = HeaderValue::from_str(&format_next_link(link)).map_err(|e| {
            AgsError::MalformedUrl {
                url: link.to_string(),
                message: e.to_string(),
            }
        })?;
        headers.insert(LINK, value);
    }

    Ok((StatusCode::OK, headers, body).into_response())
}
