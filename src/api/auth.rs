//! Bearer token handling.
//!
//! Token issuance and verification belong to the LTI security layer; the
//! server only needs to turn a presented token into its granted scopes.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use super::error::ApiError;
use super::state::AppState;
use crate::repository::Gradebook;

/// Resolves access tokens into scopes.
#[async_trait]
pub trait AccessTokenValidator: Send + Sync {
    /// Scopes granted by `token`, or `None` if the token is not valid.
    async fn scopes(&self, token: &str) -> Option<Vec<String>>;
}

/// Fixed table of tokens, e.g. from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, Vec<String>>,
}

impl StaticTokenValidator {
    pub fn new(tokens: HashMap<String, Vec<String>>) -> Self {
        Self { tokens }
    }

    pub fn with_token(mut self, token: impl Into<String>, scopes: &[&str]) -> Self {
        self.tokens.insert(
            token.into(),
            scopes.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl AccessTokenValidator for StaticTokenValidator {
    async fn scopes(&self, token: &str) -> Option<Vec<String>> {
        self.tokens.get(token).cloned()
    }
}

/// Token of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

pub(crate) async fn granted_scopes<G: Gradebook>(
    state: &AppState<G>,
    headers: &HeaderMap,
) -> Result<Vec<String>, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    state
        .tokens()
        .scopes(token)
        .await
        .ok_or(ApiError::Unauthorized)
}

pub(crate) fn authorize(allowed: bool, operation: &'static str) -> Result<(), ApiError> {
    if allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden { operation })
    }
}
