//! Score publication from the tool side.

use reqwest::Method;
use tracing::instrument;

use super::error::ClientResult;
use super::service::{Registration, ServiceClient, ServiceRequest};
use crate::error::AgsError;
use crate::resource::{LineItem, MEDIA_TYPE_SCORE, Score, serialize};
use crate::scope::SCOPE_SCORE;
use crate::url;

/// Publishes scores to a platform's line items.
pub struct ScoreServiceClient<C: ServiceClient> {
    client: C,
}

impl<C: ServiceClient> ScoreServiceClient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// POST `score` to the `/scores` endpoint of `line_item_url`, keeping
    /// any query or credentials of the line item URL.
    #[instrument(skip(self, registration, score), fields(user = %score.user_identifier))]
    pub async fn publish_score(
        &self,
        registration: &Registration,
        score: &Score,
        line_item_url: &str,
    ) -> ClientResult<()> {
        let endpoint = url::build(line_item_url, Some("scores"), &[])?;
        let request = ServiceRequest::new(Method::POST, endpoint, SCOPE_SCORE)
            .with_body(MEDIA_TYPE_SCORE, serialize(score)?);

        self.client.request(registration, request).await?;
        Ok(())
    }

    /// Publish to a line item previously fetched from the platform.
    pub async fn publish_score_for_line_item(
        &self,
        registration: &Registration,
        score: &Score,
        line_item: &LineItem,
    ) -> ClientResult<()> {
        let line_item_url = line_item
            .id
            .as_deref()
            .ok_or_else(|| AgsError::missing_field("id"))?;
        self.publish_score(registration, score, line_item_url).await
    }
}
