use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::filter::FeedbackFilter;

/// Name of the single group returned when embeddings are unavailable
pub const FALLBACK_GROUP_NAME: &str = "All Feedback";

/// Largest batch accepted in one request (OpenAI embeddings input limit)
pub const MAX_BATCH_SIZE: usize = 2048;
// `validator` length bounds are typed as u64.
const MAX_BATCH_SIZE_U64: u64 = MAX_BATCH_SIZE as u64;

/// Feedback importance.
///
/// Variants are declared in rank order, so the derived `Ord` sorts
/// `High < Medium < Low` and an ascending sort puts High first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// Where a piece of feedback came from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum FeedbackSource {
    Sales,
    Customer,
    Research,
}

/// A single piece of user-submitted feedback.
///
/// Only `name`, `description` and `importance` take part in grouping. The
/// remaining fields are carried through untouched and are used by filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub description: String,
    pub importance: Importance,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<FeedbackSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl FeedbackItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, importance: Importance) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            importance,
            source: None,
            customer: None,
            date: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_source(mut self, source: FeedbackSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Text sent to the embedding provider for this item
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.name, self.description)
    }

    pub fn sample(&self) -> FeedbackSample {
        FeedbackSample {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// The part of an item shown to the namer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSample {
    pub name: String,
    pub description: String,
}

/// A named cluster of similar feedback, sorted by importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackGroup {
    pub name: String,
    pub feedback: Vec<FeedbackItem>,
}

impl FeedbackGroup {
    pub fn new(name: impl Into<String>, feedback: Vec<FeedbackItem>) -> Self {
        Self {
            name: name.into(),
            feedback,
        }
    }

    /// Single group holding every item in its original order
    pub fn fallback(feedback: Vec<FeedbackItem>) -> Self {
        Self::new(FALLBACK_GROUP_NAME, feedback)
    }

    /// Most important level present in the group
    pub fn min_importance(&self) -> Option<Importance> {
        self.feedback.iter().map(|item| item.importance).min()
    }
}

/// Response payload: the input echoed back next to the computed groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroupedResult {
    pub feedback: Vec<FeedbackItem>,
    pub groups: Vec<FeedbackGroup>,
}

/// Request body for grouping a batch of feedback
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FeedbackBatch {
    #[validate(length(max = MAX_BATCH_SIZE_U64))]
    pub feedback: Vec<FeedbackItem>,
}

/// Request body for the filter-aware endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct FilteredFeedbackRequest {
    #[validate(length(max = MAX_BATCH_SIZE_U64))]
    pub feedback: Vec<FeedbackItem>,
    #[serde(default)]
    pub filters: Option<FeedbackFilter>,
}

/// Response body for the query endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub data: Vec<FeedbackItem>,
}
