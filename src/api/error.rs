//! Mapping of failures onto HTTP responses.
//!
//! Status taxonomy: 401 for missing or unknown tokens, 404 for insufficient
//! scope and lookup misses, 406 for rejected content types and payloads,
//! 500 for everything else. Server errors never expose their detail.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::AgsError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Missing or unknown access token")]
    #[diagnostic(code(lti_ags::api::unauthorized))]
    Unauthorized,

    #[error("Access denied: granted scopes do not allow {operation}")]
    #[diagnostic(code(lti_ags::api::forbidden))]
    Forbidden { operation: &'static str },

    #[error("Unsupported content type '{content_type}'")]
    #[diagnostic(code(lti_ags::api::unsupported_media_type))]
    UnsupportedMediaType { content_type: String },

    #[error("Request path has no {segment}")]
    #[diagnostic(code(lti_ags::api::invalid_path))]
    InvalidPath { segment: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ags(#[from] AgsError),

    #[error("Server I/O error: {0}")]
    #[diagnostic(code(lti_ags::api::io))]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } | ApiError::InvalidPath { .. } => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType { .. } => StatusCode::NOT_ACCEPTABLE,
            ApiError::Ags(AgsError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Ags(e) if e.is_client_error() => StatusCode::NOT_ACCEPTABLE,
            ApiError::Ags(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
