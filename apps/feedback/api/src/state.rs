//! Application state management.

use domain_feedback::{FeedbackService, OpenAIEmbeddingProvider, OpenAINamer};
use std::sync::Arc;

use crate::config::Config;

/// Shared application state.
///
/// Cloning is cheap: the service holds its providers behind `Arc`s and both
/// providers share one HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub feedback: FeedbackService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let embedder = OpenAIEmbeddingProvider::with_client(http.clone(), &config.openai);
        let namer = OpenAINamer::with_client(http, &config.openai);

        let feedback = FeedbackService::new(Arc::new(embedder), Arc::new(namer))
            .with_config(config.grouping.clone());

        Self { config, feedback }
    }
}
