//! Line item management from the tool side.

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::instrument;

use super::error::ClientResult;
use super::service::{Registration, ServiceClient, ServiceRequest};
use crate::error::{AgsError, AgsResult};
use crate::resource::{
    LineItem, LineItemContainer, MEDIA_TYPE_LINE_ITEM, MEDIA_TYPE_LINE_ITEM_CONTAINER,
    create_line_item, deserialize, normalize_line_item, serialize,
};
use crate::scope::{SCOPE_LINE_ITEM, SCOPE_LINE_ITEM_READ_ONLY};
use crate::url::{self, DEFAULT_SPLIT_TOKEN, extract_from_url};

/// Wire form without the empty placeholders of absent fields, which
/// platforms reject as empty values.
fn request_body(line_item: &LineItem) -> AgsResult<String> {
    let mut data = normalize_line_item(line_item)?;
    data.retain(|_, value| !value.is_null() && value.as_str() != Some(""));
    serialize(&data)
}

/// Filters for listing a context's line items.
#[derive(Debug, Clone, Default)]
pub struct LineItemFilter {
    pub resource_link_id: Option<String>,
    pub resource_id: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<usize>,
}

/// Manages line items of a platform's line item container.
pub struct LineItemServiceClient<C: ServiceClient> {
    client: C,
    split_token: String,
}

impl<C: ServiceClient> LineItemServiceClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_split_token(client, DEFAULT_SPLIT_TOKEN)
    }

    /// For platforms that separate context and line item ids with a
    /// different path token.
    pub fn with_split_token(client: C, split_token: impl Into<String>) -> Self {
        Self {
            client,
            split_token: split_token.into(),
        }
    }

    #[instrument(skip(self, registration, line_item), fields(label = %line_item.label))]
    pub async fn create_line_item(
        &self,
        registration: &Registration,
        container_url: &str,
        line_item: &LineItem,
    ) -> ClientResult<LineItem> {
        let request = ServiceRequest::new(Method::POST, container_url, SCOPE_LINE_ITEM)
            .with_accept(MEDIA_TYPE_LINE_ITEM)
            .with_body(MEDIA_TYPE_LINE_ITEM, request_body(line_item)?);
        let response = self.client.request(registration, request).await?;

        let data: Map<String, Value> = deserialize(&response.body)?;
        Ok(self.decode(&data, container_url)?)
    }

    #[instrument(skip(self, registration))]
    pub async fn get_line_item(
        &self,
        registration: &Registration,
        line_item_url: &str,
    ) -> ClientResult<LineItem> {
        let request = ServiceRequest::new(Method::GET, line_item_url, SCOPE_LINE_ITEM_READ_ONLY)
            .with_accept(MEDIA_TYPE_LINE_ITEM);
        let response = self.client.request(registration, request).await?;

        let data: Map<String, Value> = deserialize(&response.body)?;
        Ok(self.decode(&data, line_item_url)?)
    }

    /// One page of line items; the container carries the next page link
    /// when the platform sent one.
    #[instrument(skip(self, registration))]
    pub async fn list_line_items(
        &self,
        registration: &Registration,
        container_url: &str,
        filter: &LineItemFilter,
    ) -> ClientResult<LineItemContainer> {
        let limit = filter.limit.map(|l| l.to_string());
        let params: Vec<(&str, &str)> = [
            ("resource_link_id", filter.resource_link_id.as_deref()),
            ("resource_id", filter.resource_id.as_deref()),
            ("tag", filter.tag.as_deref()),
            ("limit", limit.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();

        let endpoint = url::build(container_url, None, &params)?;
        self.fetch_container(registration, endpoint).await
    }

    /// Follow a container's next link.
    pub async fn next_page(
        &self,
        registration: &Registration,
        container: &LineItemContainer,
    ) -> ClientResult<Option<LineItemContainer>> {
        match container.relation_link() {
            Some(link) => Ok(Some(
                self.fetch_container(registration, link.to_string()).await?,
            )),
            None => Ok(None),
        }
    }

    /// PUT the line item to its own id URL.
    #[instrument(skip(self, registration, line_item), fields(id = ?line_item.id))]
    pub async fn update_line_item(
        &self,
        registration: &Registration,
        line_item: &LineItem,
    ) -> ClientResult<LineItem> {
        let line_item_url = line_item
            .id
            .as_deref()
            .ok_or_else(|| AgsError::missing_field("id"))?;
        let request = ServiceRequest::new(Method::PUT, line_item_url, SCOPE_LINE_ITEM)
            .with_accept(MEDIA_TYPE_LINE_ITEM)
            .with_body(MEDIA_TYPE_LINE_ITEM, request_body(line_item)?);
        let response = self.client.request(registration, request).await?;

        let data: Map<String, Value> = deserialize(&response.body)?;
        Ok(self.decode(&data, line_item_url)?)
    }

    #[instrument(skip(self, registration))]
    pub async fn delete_line_item(
        &self,
        registration: &Registration,
        line_item_url: &str,
    ) -> ClientResult<()> {
        let request = ServiceRequest::new(Method::DELETE, line_item_url, SCOPE_LINE_ITEM);
        self.client.request(registration, request).await?;
        Ok(())
    }

    async fn fetch_container(
        &self,
        registration: &Registration,
        endpoint: String,
    ) -> ClientResult<LineItemContainer> {
        let request = ServiceRequest::new(Method::GET, endpoint.as_str(), SCOPE_LINE_ITEM_READ_ONLY)
            .with_accept(MEDIA_TYPE_LINE_ITEM_CONTAINER);
        let response = self.client.request(registration, request).await?;

        let entries: Vec<Value> = deserialize(&response.body)?;
        let line_items = entries
            .iter()
            .map(|entry| match entry {
                Value::Object(data) => self.decode(data, &endpoint),
                _ => Err(AgsError::validation("Line item entries must be JSON objects")),
            })
            .collect::<AgsResult<Vec<_>>>()?;

        Ok(LineItemContainer::new(line_items, response.link))
    }

    /// The wire form has no context id: take it from the item's own id URL,
    /// else from the URL it was fetched from.
    fn decode(&self, data: &Map<String, Value>, request_url: &str) -> AgsResult<LineItem> {
        let id = data
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());
        let from_id = match id {
            Some(id) => extract_from_url(id, &self.split_token)?.context_id,
            None => None,
        };
        let context_id = match from_id {
            Some(context_id) => context_id,
            None => extract_from_url(request_url, &self.split_token)?
                .context_id
                .ok_or_else(|| AgsError::missing_field("contextId"))?,
        };

        create_line_item(&context_id, data)
    }
}
