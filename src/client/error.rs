use miette::Diagnostic;
use thiserror::Error;

use crate::error::AgsError;

/// Errors raised while talking to a platform's AGS endpoints.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Failed to reach the platform: {0}")]
    #[diagnostic(
        code(lti_ags::client::transport),
        help("Check the line item URL and that the platform is reachable.")
    )]
    Transport(#[from] reqwest::Error),

    #[error("Platform answered {status}: {message}")]
    #[diagnostic(code(lti_ags::client::service))]
    Service { status: u16, message: String },

    #[error("Could not obtain an access token: {message}")]
    #[diagnostic(code(lti_ags::client::access_token))]
    AccessToken { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ags(#[from] AgsError),
}

pub type ClientResult<T> = Result<T, ClientError>;
