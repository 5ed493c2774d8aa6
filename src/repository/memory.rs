//! Concurrent in-memory gradebook.
//!
//! Line items receive sequential ids and are exposed under absolute URLs
//! following the `{base}/{context}{split_token}/{id}` convention. Results
//! are computed from the most recent score of each user, scaled to the
//! line item's maximum.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use ::url::Url;
use async_trait::async_trait;
use dashmap::DashMap;

use super::query::{LineItemQuery, ResultGetQuery, ScoreCreateQuery};
use super::traits::{Gradebook, LineItemRepository, ResultRepository, ScoreRepository};
use crate::error::{AgsError, AgsResult};
use crate::resource::{GradeResult, LineItem, LineItemContainer, ResultContainer, Score};
use crate::url::{self, DEFAULT_SPLIT_TOKEN, extract_from_url};

/// `(context id, line item id)`
type LineItemKey = (String, String);

/// Gradebook held in memory, safe to share between request handlers.
pub struct InMemoryGradebook {
    base_url: String,
    split_token: String,
    line_items: DashMap<LineItemKey, LineItem>,
    scores: DashMap<LineItemKey, Vec<Score>>,
    next_id: AtomicU64,
}

impl InMemoryGradebook {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_split_token(base_url, DEFAULT_SPLIT_TOKEN)
    }

    pub fn with_split_token(base_url: impl Into<String>, split_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            split_token: format!("/{}", split_token.into().trim_matches('/')),
            line_items: DashMap::new(),
            scores: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// URL of a context's line item collection.
    pub fn container_url(&self, context_id: &str) -> String {
        format!("{}/{}{}", self.base_url, context_id, self.split_token)
    }

    pub fn line_item_url(&self, context_id: &str, line_item_id: &str) -> String {
        format!("{}/{}", self.container_url(context_id), line_item_id)
    }

    fn key_for(context_id: &str, line_item_id: Option<&str>) -> AgsResult<LineItemKey> {
        let line_item_id =
            line_item_id.ok_or_else(|| AgsError::validation("A line item id is required"))?;
        Ok((context_id.to_string(), line_item_id.to_string()))
    }

    fn key_of(&self, line_item: &LineItem) -> AgsResult<LineItemKey> {
        let id = line_item
            .id
            .as_deref()
            .ok_or_else(|| AgsError::missing_field("id"))?;
        let line_item_id = extract_from_url(id, &self.split_token)?
            .line_item_id
            .ok_or_else(|| AgsError::not_found("LineItem", id))?;
        Ok((line_item.context_id.clone(), line_item_id))
    }

    /// Number of line items with a stored score list.
    #[cfg(test)]
    pub(crate) fn scored_line_items(&self) -> usize {
        self.scores.len()
    }

    fn get(&self, key: &LineItemKey) -> AgsResult<LineItem> {
        self.line_items
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AgsError::not_found("LineItem", &key.1))
    }

    /// Line items of a context, ordered by id.
    fn context_line_items(&self, context_id: &str) -> Vec<(String, LineItem)> {
        let mut items: Vec<(String, LineItem)> = self
            .line_items
            .iter()
            .filter(|entry| entry.key().0 == context_id)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect();
        items.sort_by_key(|(id, _)| sort_key(id));
        items
    }

    /// Most recent score per user, ordered by user id.
    fn latest_scores(&self, key: &LineItemKey) -> BTreeMap<String, Score> {
        let mut latest: BTreeMap<String, Score> = BTreeMap::new();
        if let Some(scores) = self.scores.get(key) {
            for score in scores.value() {
                let newer = latest
                    .get(&score.user_identifier)
                    .is_none_or(|current| score.timestamp >= current.timestamp);
                if newer {
                    latest.insert(score.user_identifier.clone(), score.clone());
                }
            }
        }
        latest
    }
}

impl Gradebook for InMemoryGradebook {
    fn line_items(&self) -> &dyn LineItemRepository {
        self
    }

    fn scores(&self) -> &dyn ScoreRepository {
        self
    }

    fn results(&self) -> &dyn ResultRepository {
        self
    }
}

fn sort_key(id: &str) -> (u64, String) {
    (id.parse().unwrap_or(u64::MAX), id.to_string())
}

/// Cut out the requested 1-based page; returns the next `(page, limit)` when
/// more items follow.
fn paginate<T>(
    items: Vec<T>,
    page: Option<usize>,
    limit: Option<usize>,
) -> (Vec<T>, Option<(usize, usize)>) {
    let Some(limit) = limit.filter(|l| *l > 0) else {
        return (items, None);
    };
    let page = page.unwrap_or(1).max(1);
    let start = (page - 1).saturating_mul(limit);
    let has_more = items.len() > start.saturating_add(limit);
    let page_items = items.into_iter().skip(start).take(limit).collect();
    (page_items, has_more.then_some((page + 1, limit)))
}

fn next_link(
    base: &str,
    next: Option<(usize, usize)>,
    filters: &[(&str, Option<&str>)],
) -> AgsResult<Option<String>> {
    let Some((page, limit)) = next else {
        return Ok(None);
    };
    let page = page.to_string();
    let limit = limit.to_string();
    let mut params = vec![("page", page.as_str()), ("limit", limit.as_str())];
    params.extend(filters.iter().filter_map(|(k, v)| v.map(|v| (*k, v))));
    url::build(base, None, &params).map(Some)
}

/// `{line item}/results/{user}`, with the user id as a single
/// percent-encoded segment.
fn result_url(line_item_url: &str, user_id: &str) -> AgsResult<String> {
    let malformed = |message: &str| AgsError::MalformedUrl {
        url: line_item_url.to_string(),
        message: message.to_string(),
    };

    let mut parsed = Url::parse(line_item_url).map_err(|e| malformed(&e.to_string()))?;
    parsed
        .path_segments_mut()
        .map_err(|_| malformed("URL cannot carry path segments"))?
        .pop_if_empty()
        .push("results")
        .push(user_id);
    Ok(parsed.to_string())
}

fn compute_result(line_item: &LineItem, line_item_url: &str, score: &Score) -> AgsResult<GradeResult> {
    let mut result = GradeResult::new(score.user_identifier.clone(), line_item_url);
    result.id = Some(result_url(line_item_url, &score.user_identifier)?);
    if let Some((given, maximum)) = score.score_pair()
        && maximum > 0.0
    {
        result.result_score = Some(given / maximum * line_item.score_maximum);
        result.result_maximum = Some(line_item.score_maximum);
    }
    result.comment = score.comment.clone();
    Ok(result)
}

#[async_trait]
impl LineItemRepository for InMemoryGradebook {
    async fn create(&self, mut line_item: LineItem) -> AgsResult<LineItem> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        line_item.id = Some(self.line_item_url(&line_item.context_id, &id));

        self.line_items
            .insert((line_item.context_id.clone(), id), line_item.clone());
        Ok(line_item)
    }

    async fn find_one(&self, query: &LineItemQuery) -> AgsResult<LineItem> {
        self.get(&Self::key_for(query.context_id(), query.line_item_id())?)
    }

    async fn find_all(&self, query: &LineItemQuery) -> AgsResult<LineItemContainer> {
        let matching: Vec<LineItem> = self
            .context_line_items(query.context_id())
            .into_iter()
            .map(|(_, item)| item)
            .filter(|item| {
                query
                    .resource_link_id()
                    .is_none_or(|v| item.resource_link_id.as_deref() == Some(v))
                    && query.tag().is_none_or(|v| item.tag.as_deref() == Some(v))
                    && query
                        .resource_id()
                        .is_none_or(|v| item.resource_id.as_deref() == Some(v))
            })
            .collect();

        let (items, next) = paginate(matching, query.page(), query.limit());
        let link = next_link(
            &self.container_url(query.context_id()),
            next,
            &[
                ("resource_link_id", query.resource_link_id()),
                ("tag", query.tag()),
                ("resource_id", query.resource_id()),
            ],
        )?;

        Ok(LineItemContainer::new(items, link))
    }

    async fn update(&self, line_item: LineItem) -> AgsResult<LineItem> {
        let key = self.key_of(&line_item)?;
        match self.line_items.get_mut(&key) {
            Some(mut entry) => {
                *entry = line_item.clone();
                Ok(line_item)
            }
            None => Err(AgsError::not_found("LineItem", key.1)),
        }
    }

    async fn delete(&self, query: &LineItemQuery) -> AgsResult<()> {
        let key = Self::key_for(query.context_id(), query.line_item_id())?;
        self.line_items
            .remove(&key)
            .ok_or_else(|| AgsError::not_found("LineItem", &key.1))?;
        self.scores.remove(&key);
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for InMemoryGradebook {
    async fn save(&self, query: ScoreCreateQuery) -> AgsResult<()> {
        let key = Self::key_for(query.context_id(), Some(query.line_item_id()))?;

        // Held until the score is stored, so a concurrent delete cannot
        // remove the line item in between and orphan the score list.
        let Some(_line_item) = self.line_items.get(&key) else {
            return Err(AgsError::not_found("LineItem", key.1));
        };

        self.scores
            .entry(key)
            .or_default()
            .push(query.into_score());
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for InMemoryGradebook {
    async fn find_all(&self, query: &ResultGetQuery) -> AgsResult<ResultContainer> {
        let context_id = query.context_id();
        let line_items = match query.line_item_id() {
            Some(id) => {
                let key = Self::key_for(context_id, Some(id))?;
                vec![(id.to_string(), self.get(&key)?)]
            }
            None => self.context_line_items(context_id),
        };

        let mut results = Vec::new();
        for (id, line_item) in &line_items {
            let key = (context_id.to_string(), id.clone());
            let line_item_url = line_item
                .id
                .clone()
                .unwrap_or_else(|| self.line_item_url(context_id, id));

            for (user_id, score) in self.latest_scores(&key) {
                if query.user_id().is_some_and(|wanted| wanted != user_id) {
                    continue;
                }
                results.push(compute_result(line_item, &line_item_url, &score)?);
            }
        }

        let (page, next) = paginate(results, query.page(), query.limit());
        let base = match query.line_item_id() {
            Some(id) => format!("{}/results", self.line_item_url(context_id, id)),
            None => self.container_url(context_id),
        };
        let link = next_link(&base, next, &[("user_id", query.user_id())])?;

        Ok(ResultContainer::new(page, link))
    }
}
