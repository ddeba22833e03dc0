//! Request-scoped feedback filtering.
//!
//! Every non-empty list narrows the batch to items whose field is one of the
//! listed values; the date range is inclusive on both ends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{FeedbackItem, FeedbackSource, Importance};

/// Inclusive date bounds; either side may be open
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackFilter {
    #[serde(default)]
    pub importance: Vec<Importance>,
    #[serde(rename = "type", default)]
    pub source: Vec<FeedbackSource>,
    #[serde(default)]
    pub customer: Vec<String>,
    #[serde(default)]
    pub date: Option<DateRange>,
}

impl FeedbackFilter {
    pub fn matches(&self, item: &FeedbackItem) -> bool {
        if !self.importance.is_empty() && !self.importance.contains(&item.importance) {
            return false;
        }

        if !self.source.is_empty() && !item.source.is_some_and(|s| self.source.contains(&s)) {
            return false;
        }

        if !self.customer.is_empty()
            && !item
                .customer
                .as_ref()
                .is_some_and(|c| self.customer.contains(c))
        {
            return false;
        }

        match &self.date {
            Some(range) if !range.is_open() => item.date.is_some_and(|d| range.contains(d)),
            _ => true,
        }
    }

    /// Items that pass the filter, in input order
    pub fn apply(&self, items: &[FeedbackItem]) -> Vec<FeedbackItem> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}
