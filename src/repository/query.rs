//! Query objects passed to the repositories.
//!
//! Queries are built once per request and never mutated afterwards; the
//! `with_*` methods consume the query and return a new one.

use crate::resource::Score;

/// Lookup of one line item, or a filtered page of a context's line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemQuery {
    context_id: String,
    line_item_id: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
    resource_link_id: Option<String>,
    tag: Option<String>,
    resource_id: Option<String>,
}

impl LineItemQuery {
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            ..Default::default()
        }
    }

    pub fn with_line_item_id(mut self, line_item_id: impl Into<String>) -> Self {
        self.line_item_id = Some(line_item_id.into());
        self
    }

    /// 1-based page number.
    pub fn with_page(mut self, page: Option<usize>) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_resource_link_id(mut self, resource_link_id: Option<String>) -> Self {
        self.resource_link_id = resource_link_id;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_resource_id(mut self, resource_id: Option<String>) -> Self {
        self.resource_id = resource_id;
        self
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    pub fn line_item_id(&self) -> Option<&str> {
        self.line_item_id.as_deref()
    }

    pub fn page(&self) -> Option<usize> {
        self.page
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn resource_link_id(&self) -> Option<&str> {
        self.resource_link_id.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }
}

/// Lookup of the results of a line item, optionally for a single user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultGetQuery {
    context_id: String,
    line_item_id: Option<String>,
    user_id: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
}

impl ResultGetQuery {
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            ..Default::default()
        }
    }

    pub fn with_line_item_id(mut self, line_item_id: impl Into<String>) -> Self {
        self.line_item_id = Some(line_item_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_page(mut self, page: Option<usize>) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    pub fn line_item_id(&self) -> Option<&str> {
        self.line_item_id.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn page(&self) -> Option<usize> {
        self.page
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// A score to record against a line item.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCreateQuery {
    context_id: String,
    line_item_id: String,
    score: Score,
}

impl ScoreCreateQuery {
    pub fn new(context_id: impl Into<String>, line_item_id: impl Into<String>, score: Score) -> Self {
        Self {
            context_id: context_id.into(),
            line_item_id: line_item_id.into(),
            score,
        }
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    pub fn line_item_id(&self) -> &str {
        &self.line_item_id
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn into_score(self) -> Score {
        self.score
    }
}
