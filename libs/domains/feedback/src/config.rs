use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or, env_required};

use crate::clustering::DEFAULT_MAX_ITERATIONS;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
pub const DEFAULT_NAMING_MODEL: &str = "gpt-4o";

/// Credentials and model names for the OpenAI-compatible API
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub naming_model: String,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            naming_model: DEFAULT_NAMING_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl FromEnv for OpenAIConfig {
    /// - OPENAI_API_KEY: required
    /// - OPENAI_BASE_URL: defaults to https://api.openai.com/v1
    /// - EMBEDDING_MODEL: defaults to text-embedding-3-large
    /// - NAMING_MODEL: defaults to gpt-4o
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("OPENAI_API_KEY")?;
        let base_url = env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);

        Ok(Self {
            embedding_model: env_or_default("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            naming_model: env_or_default("NAMING_MODEL", DEFAULT_NAMING_MODEL),
            ..Self::new(api_key).with_base_url(base_url)
        })
    }
}

/// Tuning for the grouping pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingConfig {
    pub max_iterations: usize,
    /// Fixed clustering seed; `None` draws a fresh one per request
    pub seed: Option<u64>,
    pub embedding_timeout: Duration,
    pub naming_timeout: Duration,
    /// How many items of each cluster are shown to the namer
    pub name_sample_size: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            embedding_timeout: Duration::from_secs(30),
            naming_timeout: Duration::from_secs(30),
            name_sample_size: 5,
        }
    }
}

impl GroupingConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl FromEnv for GroupingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = env_optional("CLUSTER_SEED")
            .map(|raw| {
                raw.parse().map_err(|e| ConfigError::ParseError {
                    key: "CLUSTER_SEED".to_string(),
                    details: format!("{}", e),
                })
            })
            .transpose()?;

        Ok(Self {
            max_iterations: env_parse_or("CLUSTER_MAX_ITERATIONS", defaults.max_iterations)?,
            seed,
            embedding_timeout: Duration::from_secs(env_parse_or(
                "EMBEDDING_TIMEOUT_SECS",
                defaults.embedding_timeout.as_secs(),
            )?),
            naming_timeout: Duration::from_secs(env_parse_or(
                "NAMING_TIMEOUT_SECS",
                defaults.naming_timeout.as_secs(),
            )?),
            name_sample_size: defaults.name_sample_size,
        })
    }
}
