use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ClusterNamer;
use crate::config::OpenAIConfig;
use crate::error::{FeedbackError, FeedbackResult};
use crate::models::FeedbackSample;

pub const NAMING_SYSTEM_PROMPT: &str = "Generate a short, descriptive name for a group of similar feedback items. It should be 3-6 words and be intuitive as to what the feedback is requesting or suggesting.";

/// Render samples as the user message sent to the model
pub fn format_samples(samples: &[FeedbackSample]) -> String {
    let lines: Vec<String> = samples
        .iter()
        .map(|s| format!("- {}: {}", s.name, s.description))
        .collect();
    format!("Feedback items:\n{}", lines.join("\n"))
}

/// Cluster names from the OpenAI `/chat/completions` endpoint
pub struct OpenAINamer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAINamer {
    pub fn new(config: &OpenAIConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &OpenAIConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.naming_model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_name(self) -> FeedbackResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| FeedbackError::Naming("No completion returned".to_string()))
    }
}

#[async_trait]
impl ClusterNamer for OpenAINamer {
    async fn name_cluster(&self, samples: &[FeedbackSample]) -> FeedbackResult<String> {
        let prompt = format_samples(samples);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: NAMING_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedbackError::Naming(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FeedbackError::Naming(format!(
                "OpenAI API error {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| FeedbackError::Naming(format!("Failed to parse response: {}", e)))?;

        let name = chat.into_name()?;
        debug!(name = %name, samples = samples.len(), "Named cluster");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(name: &str, description: &str) -> FeedbackSample {
        FeedbackSample {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_format_samples() {
        let samples = vec![
            sample("SSO", "Support Okta login"),
            sample("SAML", "Enterprise SAML"),
        ];
        assert_eq!(
            format_samples(&samples),
            "Feedback items:\n- SSO: Support Okta login\n- SAML: Enterprise SAML"
        );
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: NAMING_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "Feedback items:\n- a: b",
                },
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "Feedback items:\n- a: b");
    }

    #[test]
    fn test_response_name_is_trimmed() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Enterprise Login Options\n"}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_name().unwrap(), "Enterprise Login Options");
    }

    #[test]
    fn test_response_without_choices_is_an_error() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            response.into_name(),
            Err(FeedbackError::Naming(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_naming_error() {
        let config = OpenAIConfig::new("sk-test").with_base_url("http://127.0.0.1:9");
        let namer = OpenAINamer::new(&config);

        let err = namer
            .name_cluster(&[sample("a", "b")])
            .await
            .unwrap_err();
        assert!(matches!(err, FeedbackError::Naming(_)));
    }
}
