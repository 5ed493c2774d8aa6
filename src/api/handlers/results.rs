//! Result listing handler.

use axum::{
    extract::{OriginalUri, Query, State, rejection::QueryRejection},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use super::{ResourcePath, query_params, resource_response};
use crate::api::AppState;
use crate::api::auth::{authorize, granted_scopes};
use crate::api::error::ApiError;
use crate::repository::{Gradebook, ResultGetQuery};
use crate::resource::{MEDIA_TYPE_RESULT_CONTAINER, serialize};
use crate::scope::can_read_result;

#[derive(Debug, Deserialize)]
pub struct ListResultsQuery {
    /// Only the result of this user
    pub user_id: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[instrument(skip(state, headers))]
pub async fn list_results<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    query: Result<Query<ListResultsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_read_result(&scopes), "reading results")?;
    let query = query_params(query)?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;

    let db_query = ResultGetQuery::new(path.context_id())
        .with_line_item_id(path.line_item_id()?)
        .with_user_id(query.user_id)
        .with_page(query.page)
        .with_limit(query.limit);

    let container = state.gradebook().results().find_all(&db_query).await?;

    resource_response(
        MEDIA_TYPE_RESULT_CONTAINER,
        serialize(&container)?,
        container.relation_link(),
    )
}
