//! Gradebook resources exchanged through Assignment & Grade Services.

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// Media type of a single line item.
pub const MEDIA_TYPE_LINE_ITEM: &str = "application/vnd.ims.lis.v2.lineitem+json";
/// Media type of a line item collection.
pub const MEDIA_TYPE_LINE_ITEM_CONTAINER: &str =
    "application/vnd.ims.lis.v2.lineitemcontainer+json";
/// Media type of a score submission.
pub const MEDIA_TYPE_SCORE: &str = "application/vnd.ims.lis.v1.score+json";
/// Media type of a result collection.
pub const MEDIA_TYPE_RESULT_CONTAINER: &str = "application/vnd.ims.lis.v2.resultcontainer+json";

/// Timestamps always carry their UTC offset on the wire.
pub type Timestamp = DateTime<FixedOffset>;

/// Open bag of wire properties outside the known set, in source order.
pub type AdditionalProperties = Map<String, Value>;

// =============================================================================
// Line items
// =============================================================================

/// A gradable activity slot in a context's gradebook.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub context_id: String,
    pub score_maximum: f64,
    pub label: String,
    /// Server-assigned resource URL.
    pub id: Option<String>,
    pub start_date_time: Option<Timestamp>,
    pub end_date_time: Option<Timestamp>,
    pub tag: Option<String>,
    pub resource_id: Option<String>,
    pub resource_link_id: Option<String>,
}

impl LineItem {
    pub fn new(context_id: impl Into<String>, score_maximum: f64, label: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            score_maximum,
            label: label.into(),
            id: None,
            start_date_time: None,
            end_date_time: None,
            tag: None,
            resource_id: None,
            resource_link_id: None,
        }
    }
}

/// Ordered page of line items plus the link to the next page, if any.
///
/// The container never fetches the next page itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemContainer {
    line_items: Vec<LineItem>,
    relation_link: Option<String>,
}

impl LineItemContainer {
    pub fn new(line_items: Vec<LineItem>, relation_link: Option<String>) -> Self {
        Self {
            line_items,
            relation_link,
        }
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn relation_link(&self) -> Option<&str> {
        self.relation_link.as_deref().filter(|l| !l.is_empty())
    }

    pub fn has_next(&self) -> bool {
        self.relation_link().is_some()
    }

    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

impl IntoIterator for LineItemContainer {
    type Item = LineItem;
    type IntoIter = std::vec::IntoIter<LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.line_items.into_iter()
    }
}

// =============================================================================
// Scores
// =============================================================================

/// Status of the user's activity on the line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityProgress {
    #[default]
    Initialized,
    Started,
    InProgress,
    Submitted,
    Completed,
}

impl ActivityProgress {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityProgress::Initialized => "Initialized",
            ActivityProgress::Started => "Started",
            ActivityProgress::InProgress => "InProgress",
            ActivityProgress::Submitted => "Submitted",
            ActivityProgress::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ActivityProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityProgress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Initialized" => Ok(ActivityProgress::Initialized),
            "Started" => Ok(ActivityProgress::Started),
            "InProgress" => Ok(ActivityProgress::InProgress),
            "Submitted" => Ok(ActivityProgress::Submitted),
            "Completed" => Ok(ActivityProgress::Completed),
            _ => Err(format!("Unknown activity progress: {}", s)),
        }
    }
}

/// Status of the grading process for the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradingProgress {
    FullyGraded,
    Pending,
    PendingManual,
    Failed,
    #[default]
    NotReady,
}

impl GradingProgress {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradingProgress::FullyGraded => "FullyGraded",
            GradingProgress::Pending => "Pending",
            GradingProgress::PendingManual => "PendingManual",
            GradingProgress::Failed => "Failed",
            GradingProgress::NotReady => "NotReady",
        }
    }
}

impl std::fmt::Display for GradingProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GradingProgress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FullyGraded" => Ok(GradingProgress::FullyGraded),
            "Pending" => Ok(GradingProgress::Pending),
            "PendingManual" => Ok(GradingProgress::PendingManual),
            "Failed" => Ok(GradingProgress::Failed),
            "NotReady" => Ok(GradingProgress::NotReady),
            _ => Err(format!("Unknown grading progress: {}", s)),
        }
    }
}

/// One submission of progress for a user against a line item.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub user_identifier: String,
    pub activity_progress: ActivityProgress,
    pub grading_progress: GradingProgress,
    /// Only published together with `score_maximum`.
    pub score_given: Option<f64>,
    pub score_maximum: Option<f64>,
    pub comment: Option<String>,
    pub timestamp: Timestamp,
}

impl Score {
    /// A score with default progress values, stamped with the current time.
    pub fn new(user_identifier: impl Into<String>) -> Self {
        Self {
            user_identifier: user_identifier.into(),
            activity_progress: ActivityProgress::default(),
            grading_progress: GradingProgress::default(),
            score_given: None,
            score_maximum: None,
            comment: None,
            timestamp: chrono::Utc::now().fixed_offset(),
        }
    }

    /// Both halves of the score pair, or nothing.
    pub fn score_pair(&self) -> Option<(f64, f64)> {
        self.score_given.zip(self.score_maximum)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Read-only grade record computed by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    pub user_identifier: String,
    /// Line item the result belongs to (`scoreOf` on the wire).
    pub line_item_identifier: String,
    pub id: Option<String>,
    pub result_score: Option<f64>,
    pub result_maximum: Option<f64>,
    pub comment: Option<String>,
    pub additional_properties: AdditionalProperties,
}

impl GradeResult {
    pub fn new(user_identifier: impl Into<String>, line_item_identifier: impl Into<String>) -> Self {
        Self {
            user_identifier: user_identifier.into(),
            line_item_identifier: line_item_identifier.into(),
            id: None,
            result_score: None,
            result_maximum: None,
            comment: None,
            additional_properties: AdditionalProperties::new(),
        }
    }
}

/// Ordered page of results plus the link to the next page, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultContainer {
    results: Vec<GradeResult>,
    relation_link: Option<String>,
}

impl ResultContainer {
    pub fn new(results: Vec<GradeResult>, relation_link: Option<String>) -> Self {
        Self {
            results,
            relation_link,
        }
    }

    pub fn results(&self) -> &[GradeResult] {
        &self.results
    }

    pub fn relation_link(&self) -> Option<&str> {
        self.relation_link.as_deref().filter(|l| !l.is_empty())
    }

    pub fn has_next(&self) -> bool {
        self.relation_link().is_some()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for ResultContainer {
    type Item = GradeResult;
    type IntoIter = std::vec::IntoIter<GradeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
