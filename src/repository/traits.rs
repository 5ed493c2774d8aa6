//! Repository traits for gradebook data access.

use async_trait::async_trait;

use super::query::{LineItemQuery, ResultGetQuery, ScoreCreateQuery};
use crate::error::AgsResult;
use crate::resource::{LineItem, LineItemContainer, ResultContainer};

/// Repository for line items.
#[async_trait]
pub trait LineItemRepository: Send + Sync {
    /// Persist a new line item and return it with its assigned id.
    async fn create(&self, line_item: LineItem) -> AgsResult<LineItem>;

    /// Get the line item named by the query. Fails with `NotFound` if absent.
    async fn find_one(&self, query: &LineItemQuery) -> AgsResult<LineItem>;

    /// Get a filtered page of the context's line items.
    async fn find_all(&self, query: &LineItemQuery) -> AgsResult<LineItemContainer>;

    /// Replace an existing line item, identified by its id.
    async fn update(&self, line_item: LineItem) -> AgsResult<LineItem>;

    /// Delete the line item named by the query.
    async fn delete(&self, query: &LineItemQuery) -> AgsResult<()>;
}

/// Repository for score submissions.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Record a score. Fails with `NotFound` if the line item does not exist.
    async fn save(&self, query: ScoreCreateQuery) -> AgsResult<()>;
}

/// Repository for computed results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Get a page of results matching the query.
    async fn find_all(&self, query: &ResultGetQuery) -> AgsResult<ResultContainer>;
}

/// Combined gradebook interface.
pub trait Gradebook: Send + Sync {
    /// Get the line item repository.
    fn line_items(&self) -> &dyn LineItemRepository;

    /// Get the score repository.
    fn scores(&self) -> &dyn ScoreRepository;

    /// Get the result repository.
    fn results(&self) -> &dyn ResultRepository;
}
