//! Core error types for the AGS protocol layer.
//!
//! Every fallible operation in the extractor, validators, factories,
//! normalizers and codec returns [`AgsError`]. Errors are propagated to the
//! caller untouched; mapping them onto HTTP responses is the job of the
//! request handlers.

use miette::Diagnostic;
use thiserror::Error;

/// Protocol-level errors.
#[derive(Error, Diagnostic, Debug)]
pub enum AgsError {
    #[error("Validation error: {message}")]
    #[diagnostic(code(lti_ags::validation))]
    Validation { message: String },

    #[error("Malformed input: {message}")]
    #[diagnostic(
        code(lti_ags::malformed_input),
        help("The payload must be a well-formed JSON document.")
    )]
    MalformedInput { message: String },

    #[error("Malformed URL '{url}': {message}")]
    #[diagnostic(code(lti_ags::malformed_url))]
    MalformedUrl { url: String, message: String },

    #[error("Missing mandatory field: {field}")]
    #[diagnostic(code(lti_ags::missing_field))]
    MissingField { field: String },

    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(lti_ags::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Serialization error: {message}")]
    #[diagnostic(code(lti_ags::serialization))]
    Serialization { message: String },

    #[error("Storage error: {message}")]
    #[diagnostic(code(lti_ags::storage))]
    Storage { message: String },
}

impl AgsError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        AgsError::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        AgsError::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        AgsError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than by the
    /// system processing it.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AgsError::Validation { .. }
                | AgsError::MalformedInput { .. }
                | AgsError::MissingField { .. }
                | AgsError::NotFound { .. }
        )
    }
}

/// Result type for protocol operations.
pub type AgsResult<T> = Result<T, AgsError>;
