use std::sync::Arc;

use futures::future::try_join_all;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::clustering::{self, cluster_count};
use crate::config::GroupingConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{FeedbackError, FeedbackResult};
use crate::models::{
    FeedbackBatch, FeedbackGroup, FeedbackItem, FeedbackSample, FilteredFeedbackRequest,
    GroupedResult, QueryResponse,
};
use crate::naming::ClusterNamer;

/// Groups feedback by meaning and names each group.
///
/// Stateless across requests: every call embeds, clusters and names its own
/// batch from scratch.
#[derive(Clone)]
pub struct FeedbackService {
    embedder: Arc<dyn EmbeddingProvider>,
    namer: Arc<dyn ClusterNamer>,
    config: GroupingConfig,
}

impl FeedbackService {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, namer: Arc<dyn ClusterNamer>) -> Self {
        Self {
            embedder,
            namer,
            config: GroupingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GroupingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Group a batch and echo it back next to the groups
    pub async fn group(&self, batch: FeedbackBatch) -> FeedbackResult<GroupedResult> {
        let groups = self.group_feedback(&batch.feedback).await?;
        Ok(GroupedResult {
            feedback: batch.feedback,
            groups,
        })
    }

    /// Apply the request's filters, then group whatever is left
    pub async fn group_with_filter(
        &self,
        request: FilteredFeedbackRequest,
    ) -> FeedbackResult<GroupedResult> {
        let feedback = select(request);
        let groups = self.group_feedback(&feedback).await?;
        Ok(GroupedResult { feedback, groups })
    }

    /// Items matching the request's filters, without grouping
    pub fn query(&self, request: FilteredFeedbackRequest) -> QueryResponse {
        QueryResponse {
            data: select(request),
        }
    }

    /// Partition `items` into named groups.
    ///
    /// An empty batch yields no groups and makes no provider calls. If
    /// embeddings cannot be obtained the whole batch comes back as a single
    /// "All Feedback" group in input order. Naming failures abort the call.
    ///
    /// Items inside a group are ordered High, Medium, Low (stable), and
    /// groups are ordered by the most important item they contain.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn group_feedback(&self, items: &[FeedbackItem]) -> FeedbackResult<Vec<FeedbackGroup>> {
        if items.is_empty() {
            return Ok(vec![]);
        }

        let vectors = match self.embed(items).await {
            Ok(vectors) => vectors,
            Err(e) => {
                warn!(error = %e, "Embedding failed, returning a single group");
                return Ok(vec![FeedbackGroup::fallback(items.to_vec())]);
            }
        };

        let k = cluster_count(items.len()).min(items.len());
        let assignments = {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            clustering::cluster(&vectors, k, self.config.max_iterations, &mut rng)?
        };

        let clusters = partition(items, &assignments);
        let names = try_join_all(clusters.iter().map(|members| self.name(members))).await?;

        let mut groups: Vec<FeedbackGroup> = names
            .into_iter()
            .zip(clusters)
            .map(|(name, members)| FeedbackGroup::new(name, members))
            .collect();
        groups.sort_by_key(FeedbackGroup::min_importance);

        info!(k, groups = groups.len(), "Grouped feedback");
        Ok(groups)
    }

    async fn embed(&self, items: &[FeedbackItem]) -> FeedbackResult<Vec<Vec<f32>>> {
        let texts: Vec<String> = items.iter().map(FeedbackItem::embedding_text).collect();

        let vectors = timeout(self.config.embedding_timeout, self.embedder.embed_batch(&texts))
            .await
            .map_err(|_| {
                FeedbackError::Embedding(format!(
                    "timed out after {:?}",
                    self.config.embedding_timeout
                ))
            })??;

        if vectors.len() != texts.len() {
            return Err(FeedbackError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        let dimension = vectors.first().map(Vec::len).unwrap_or_default();
        if vectors.iter().any(|v| v.len() != dimension) {
            return Err(FeedbackError::Embedding(
                "embeddings have inconsistent dimensions".to_string(),
            ));
        }

        Ok(vectors)
    }

    async fn name(&self, members: &[FeedbackItem]) -> FeedbackResult<String> {
        let samples: Vec<FeedbackSample> = members
            .iter()
            .take(self.config.name_sample_size)
            .map(FeedbackItem::sample)
            .collect();

        let name = timeout(self.config.naming_timeout, self.namer.name_cluster(&samples))
            .await
            .map_err(|_| {
                FeedbackError::Naming(format!("timed out after {:?}", self.config.naming_timeout))
            })??;

        Ok(name.trim().to_string())
    }
}

fn select(request: FilteredFeedbackRequest) -> Vec<FeedbackItem> {
    match request.filters {
        Some(filter) => filter.apply(&request.feedback),
        None => request.feedback,
    }
}

/// Split items into their clusters, sorted by importance.
///
/// Clusters appear in order of their first member and empty clusters are
/// dropped.
fn partition(items: &[FeedbackItem], assignments: &[usize]) -> Vec<Vec<FeedbackItem>> {
    let mut order: Vec<usize> = Vec::new();
    let mut clusters: Vec<Vec<FeedbackItem>> = Vec::new();

    for (item, &cluster_id) in items.iter().zip(assignments) {
        let slot = match order.iter().position(|&id| id == cluster_id) {
            Some(slot) => slot,
            None => {
                order.push(cluster_id);
                clusters.push(Vec::new());
                clusters.len() - 1
            }
        };
        clusters[slot].push(item.clone());
    }

    for members in &mut clusters {
        members.sort_by_key(|item| item.importance);
    }
    clusters
}
