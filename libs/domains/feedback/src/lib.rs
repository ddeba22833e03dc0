//! Feedback Domain Library
//!
//! Groups a batch of user feedback by meaning and gives every group a short
//! human-readable name.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ FeedbackService  │  ← embed, cluster, name, sort
//! └────────┬─────────┘
//!          │
//! ┌────────▼──────────┐   ┌──────────────┐   ┌──────────────┐
//! │ EmbeddingProvider │   │  clustering  │   │ ClusterNamer │
//! │      (trait)      │   │   (cosine)   │   │   (trait)    │
//! └────────┬──────────┘   └──────────────┘   └──────┬───────┘
//!          │                                        │
//! ┌────────▼────────────────┐              ┌────────▼─────┐
//! │ OpenAIEmbeddingProvider │              │ OpenAINamer  │
//! └─────────────────────────┘              └──────────────┘
//! ```
//!
//! Each request is handled from scratch: nothing is stored between calls.
//! If embeddings cannot be obtained the batch comes back as one
//! "All Feedback" group; a naming failure fails the whole request.
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_feedback::{
//!     FeedbackItem, FeedbackService, GroupingConfig, Importance, OpenAIConfig,
//!     OpenAIEmbeddingProvider, OpenAINamer,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let openai = OpenAIConfig::from_env()?;
//! let service = FeedbackService::new(
//!     Arc::new(OpenAIEmbeddingProvider::new(&openai)),
//!     Arc::new(OpenAINamer::new(&openai)),
//! )
//! .with_config(GroupingConfig::from_env()?);
//!
//! let items = vec![
//!     FeedbackItem::new("SSO", "Support Okta login", Importance::High),
//!     FeedbackItem::new("CSV export", "Export reports to CSV", Importance::Low),
//! ];
//! for group in service.group_feedback(&items).await? {
//!     println!("{}: {} items", group.name, group.feedback.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod clustering;
pub mod config;
pub mod embedding;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod naming;
pub mod service;
pub mod similarity;

// Re-export commonly used types
pub use clustering::{ClusterError, cluster, cluster_count};
pub use config::{GroupingConfig, OpenAIConfig};
pub use embedding::{EmbeddingProvider, OpenAIEmbeddingProvider};
pub use error::{FeedbackError, FeedbackResult};
pub use filter::{DateRange, FeedbackFilter};
pub use handlers::ApiDoc;
pub use models::{
    FALLBACK_GROUP_NAME, FeedbackBatch, FeedbackGroup, FeedbackItem, FeedbackSample,
    FeedbackSource, FilteredFeedbackRequest, GroupedResult, Importance, MAX_BATCH_SIZE,
    QueryResponse,
};
pub use naming::{ClusterNamer, OpenAINamer};
pub use service::FeedbackService;
pub use similarity::cosine_similarity;
