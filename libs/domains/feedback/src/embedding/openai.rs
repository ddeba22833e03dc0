use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmbeddingProvider;
use crate::config::OpenAIConfig;
use crate::error::{FeedbackError, FeedbackResult};

/// Embeddings from the OpenAI `/embeddings` endpoint
pub struct OpenAIEmbeddingProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIEmbeddingProvider {
    pub fn new(config: &OpenAIConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &OpenAIConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.embedding_model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

impl EmbeddingResponse {
    /// Vectors in input order, checked against the number of inputs sent
    fn into_vectors(self, expected: usize) -> FeedbackResult<Vec<Vec<f32>>> {
        let mut data = self.data;
        if data.len() != expected {
            return Err(FeedbackError::Embedding(format!(
                "expected {} embeddings, got {}",
                expected,
                data.len()
            )));
        }

        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

fn request_error(err: reqwest::Error) -> FeedbackError {
    FeedbackError::Embedding(err.to_string())
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> FeedbackResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FeedbackError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(request_error)?;
        let vectors = embedding_response.into_vectors(texts.len())?;

        debug!(
            count = vectors.len(),
            dimension = vectors.first().map(Vec::len).unwrap_or_default(),
            model = %self.model,
            "Received embeddings"
        );
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let input = vec!["a b".to_string(), "c d".to_string()];
        let request = EmbeddingRequest {
            model: "text-embedding-3-large",
            input: &input,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"model": "text-embedding-3-large", "input": ["a b", "c d"]})
        );
    }

    #[test]
    fn test_response_is_reordered_by_index() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "model": "text-embedding-3-large",
            "usage": {"prompt_tokens": 4, "total_tokens": 4}
        }))
        .unwrap();

        assert_eq!(
            response.into_vectors(2).unwrap(),
            vec![vec![1.0, 0.0], vec![0.0, 1.0]]
        );
    }

    #[test]
    fn test_response_count_mismatch_is_an_error() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [{"index": 0, "embedding": [1.0]}]
        }))
        .unwrap();

        let err = response.into_vectors(3).unwrap_err();
        assert!(matches!(err, FeedbackError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_empty_input_skips_request() {
        let config = OpenAIConfig::new("sk-test").with_base_url("http://127.0.0.1:9");
        let provider = OpenAIEmbeddingProvider::new(&config);
        assert!(provider.embed_batch(&[]).await.unwrap().is_empty());
    }
}
