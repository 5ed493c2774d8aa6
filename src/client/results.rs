//! Result retrieval from the tool side.

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::error::ClientResult;
use super::service::{Registration, ServiceClient, ServiceRequest};
use crate::error::AgsError;
use crate::resource::{MEDIA_TYPE_RESULT_CONTAINER, ResultContainer, create_result, deserialize};
use crate::scope::SCOPE_RESULT_READ_ONLY;
use crate::url;

/// Reads the results of a platform's line items.
pub struct ResultServiceClient<C: ServiceClient> {
    client: C,
}

impl<C: ServiceClient> ResultServiceClient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// GET the `/results` endpoint of `line_item_url`, optionally for a
    /// single user and with a page size.
    #[instrument(skip(self, registration))]
    pub async fn list_results(
        &self,
        registration: &Registration,
        line_item_url: &str,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> ClientResult<ResultContainer> {
        let limit = limit.map(|l| l.to_string());
        let mut params = Vec::new();
        if let Some(user_id) = user_id {
            params.push(("user_id", user_id));
        }
        if let Some(limit) = &limit {
            params.push(("limit", limit.as_str()));
        }

        let endpoint = url::build(line_item_url, Some("results"), &params)?;
        self.fetch(registration, endpoint).await
    }

    /// Follow a container's next link.
    pub async fn next_page(
        &self,
        registration: &Registration,
        container: &ResultContainer,
    ) -> ClientResult<Option<ResultContainer>> {
        match container.relation_link() {
            Some(link) => Ok(Some(self.fetch(registration, link.to_string()).await?)),
            None => Ok(None),
        }
    }

    async fn fetch(
        &self,
        registration: &Registration,
        endpoint: String,
    ) -> ClientResult<ResultContainer> {
        let request = ServiceRequest::new(Method::GET, endpoint, SCOPE_RESULT_READ_ONLY)
            .with_accept(MEDIA_TYPE_RESULT_CONTAINER);
        let response = self.client.request(registration, request).await?;

        let entries: Vec<Value> = deserialize(&response.body)?;
        let results = entries
            .iter()
            .map(|entry| match entry {
                Value::Object(data) => create_result(data),
                _ => Err(AgsError::validation("Result entries must be JSON objects")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultContainer::new(results, response.link))
    }
}
