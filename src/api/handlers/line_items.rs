//! Line item handlers.

use axum::{
    body::Bytes,
    extract::{OriginalUri, Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ResourcePath, query_params, require_content_type, resource_response};
use crate::api::AppState;
use crate::api::auth::{authorize, granted_scopes};
use crate::api::error::ApiError;
use crate::repository::{Gradebook, LineItemQuery};
use crate::resource::{
    self, MEDIA_TYPE_LINE_ITEM, MEDIA_TYPE_LINE_ITEM_CONTAINER, parse_payload, serialize,
    validate_line_item,
};
use crate::scope::{can_read_line_item, can_write_line_item};

#[derive(Debug, Deserialize)]
pub struct ListLineItemsQuery {
    /// 1-based page number
    pub page: Option<usize>,
    /// Maximum number of items per page
    pub limit: Option<usize>,
    pub resource_link_id: Option<String>,
    pub tag: Option<String>,
    pub resource_id: Option<String>,
}

#[instrument(skip(state, headers))]
pub async fn list_line_items<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    query: Result<Query<ListLineItemsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_read_line_item(&scopes), "reading line items")?;
    let query = query_params(query)?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;

    let db_query = LineItemQuery::new(path.context_id())
        .with_page(query.page)
        .with_limit(query.limit)
        .with_resource_link_id(query.resource_link_id)
        .with_tag(query.tag)
        .with_resource_id(query.resource_id);

    let container = state.gradebook().line_items().find_all(&db_query).await?;
    debug!(count = container.len(), has_next = container.has_next(), "listed line items");

    resource_response(
        MEDIA_TYPE_LINE_ITEM_CONTAINER,
        serialize(&container)?,
        container.relation_link(),
    )
}

#[instrument(skip(state, headers))]
pub async fn get_line_item<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_read_line_item(&scopes), "reading line items")?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;

    let db_query = LineItemQuery::new(path.context_id()).with_line_item_id(path.line_item_id()?);
    let line_item = state.gradebook().line_items().find_one(&db_query).await?;

    resource_response(MEDIA_TYPE_LINE_ITEM, serialize(&line_item)?, None)
}

#[instrument(skip(state, headers, body))]
pub async fn create_line_item<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_write_line_item(&scopes), "writing line items")?;
    require_content_type(&headers, MEDIA_TYPE_LINE_ITEM)?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;

    let data = parse_payload(&body)?;
    validate_line_item(&data)?;
    let line_item = resource::create_line_item(path.context_id(), &data)?;

    let created = state.gradebook().line_items().create(line_item).await?;
    debug!(id = created.id.as_deref().unwrap_or_default(), "created line item");

    resource_response(MEDIA_TYPE_LINE_ITEM, serialize(&created)?, None)
}

/// Replaces the whole line item; the stored id is kept.
#[instrument(skip(state, headers, body))]
pub async fn update_line_item<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_write_line_item(&scopes), "writing line items")?;
    require_content_type(&headers, MEDIA_TYPE_LINE_ITEM)?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;

    let db_query = LineItemQuery::new(path.context_id()).with_line_item_id(path.line_item_id()?);
    let existing = state.gradebook().line_items().find_one(&db_query).await?;

    let data = parse_payload(&body)?;
    validate_line_item(&data)?;
    let mut line_item = resource::create_line_item(path.context_id(), &data)?;
    line_item.id = existing.id;

    let updated = state.gradebook().line_items().update(line_item).await?;

    resource_response(MEDIA_TYPE_LINE_ITEM, serialize(&updated)?, None)
}

#[instrument(skip(state, headers))]
pub async fn delete_line_item<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_write_line_item(&scopes), "writing line items")?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;

    let db_query = LineItemQuery::new(path.context_id()).with_line_item_id(path.line_item_id()?);
    state.gradebook().line_items().delete(&db_query).await?;

    Ok(StatusCode::OK)
}
