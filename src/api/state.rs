//! Application state for the API server.

use std::sync::Arc;

use super::auth::AccessTokenValidator;
use crate::repository::Gradebook;

/// Shared application state.
///
/// Generic over `G: Gradebook` so any storage backend can be plugged in;
/// the token validator is shared as a trait object.
pub struct AppState<G: Gradebook> {
    gradebook: Arc<G>,
    tokens: Arc<dyn AccessTokenValidator>,
    split_token: Arc<str>,
}

// Manual Clone impl - only the Arcs are cloned, G need not be Clone
impl<G: Gradebook> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            gradebook: Arc::clone(&self.gradebook),
            tokens: Arc::clone(&self.tokens),
            split_token: Arc::clone(&self.split_token),
        }
    }
}

impl<G: Gradebook> AppState<G> {
    /// The split token is normalized to a single leading `/`.
    pub fn new(
        gradebook: G,
        tokens: impl AccessTokenValidator + 'static,
        split_token: impl AsRef<str>,
    ) -> Self {
        let split_token = format!("/{}", split_token.as_ref().trim_matches('/'));
        Self {
            gradebook: Arc::new(gradebook),
            tokens: Arc::new(tokens),
            split_token: split_token.into(),
        }
    }

    /// Get a reference to the gradebook.
    pub fn gradebook(&self) -> &G {
        &self.gradebook
    }

    /// Get a reference to the access token validator.
    pub fn tokens(&self) -> &dyn AccessTokenValidator {
        self.tokens.as_ref()
    }

    pub fn split_token(&self) -> &str {
        &self.split_token
    }
}
