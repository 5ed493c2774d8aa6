//! Score publication handler.

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode},
};
use tracing::{debug, instrument};

use super::{ResourcePath, require_content_type};
use crate::api::AppState;
use crate::api::auth::{authorize, granted_scopes};
use crate::api::error::ApiError;
use crate::repository::{Gradebook, ScoreCreateQuery};
use crate::resource::{MEDIA_TYPE_SCORE, create_score, parse_payload, validate_score};
use crate::scope::can_write_score;

#[instrument(skip(state, headers, body))]
pub async fn publish_score<G: Gradebook>(
    State(state): State<AppState<G>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let scopes = granted_scopes(&state, &headers).await?;
    authorize(can_write_score(&scopes), "publishing scores")?;
    require_content_type(&headers, MEDIA_TYPE_SCORE)?;
    let path = ResourcePath::from_uri(&uri, state.split_token())?;
    let line_item_id = path.line_item_id()?;

    let data = parse_payload(&body)?;
    validate_score(&data)?;
    let score = create_score(&data)?;
    debug!(user = %score.user_identifier, line_item_id, "publishing score");

    state
        .gradebook()
        .scores()
        .save(ScoreCreateQuery::new(path.context_id(), line_item_id, score))
        .await?;

    Ok(StatusCode::OK)
}
