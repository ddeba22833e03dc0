use async_trait::async_trait;

use crate::error::FeedbackResult;
use crate::models::FeedbackSample;

/// Produces a short human-readable label for a cluster of feedback.
///
/// `samples` holds the most important items of the cluster, never more than
/// the configured sample size and never empty.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterNamer: Send + Sync {
    async fn name_cluster(&self, samples: &[FeedbackSample]) -> FeedbackResult<String>;
}
