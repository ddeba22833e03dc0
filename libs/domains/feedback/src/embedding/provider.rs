use async_trait::async_trait;

use crate::error::FeedbackResult;

/// Turns texts into embedding vectors.
///
/// Implementations return exactly one vector per input text, in input order,
/// all of the same dimension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> FeedbackResult<Vec<Vec<f32>>>;
}
