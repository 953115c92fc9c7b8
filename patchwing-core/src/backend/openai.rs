//! OpenAI-compatible chat completion backend (primary provider)

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ReviewConfig;
use crate::{Error, Result};

use super::wire::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Client for an OpenAI-compatible `/chat/completions` endpoint
///
/// Generation parameters are captured from configuration at construction
/// and sent with every request.
#[derive(Clone)]
pub struct OpenAiBackend {
    http: Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: Option<u32>,
}

impl OpenAiBackend {
    /// Create a backend bound to the configured base URL and parameters
    pub fn new(api_key: String, config: &ReviewConfig) -> Self {
        Self {
            http: Client::new(),
            api_base: config.openai_api_base.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        }
    }

    /// Send one prompt as a single user message and return the completion
    /// text
    ///
    /// Transport and API failures propagate; no retries are attempted here.
    pub async fn send(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = self.request_body(prompt);

        debug!(model = %self.model, url = %url, "Sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "chat completion request failed: {} {}",
                status, text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion.first_content();

        if content.is_empty() {
            warn!(model = %self.model, "Provider returned empty completion content");
        }

        Ok(content)
    }

    /// Build the request body for a prompt
    pub(crate) fn request_body(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: Some(self.model.clone()),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
            max_tokens: self.max_tokens,
        }
    }
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OpenAiBackend {
        let config = ReviewConfig {
            openai_api_key: Some("sk-test".to_string()),
            max_tokens: Some(512),
            ..ReviewConfig::default()
        };
        OpenAiBackend::new("sk-test".to_string(), &config)
    }

    #[test]
    fn test_request_body_is_single_user_message() {
        let body = backend().request_body("instruction:\n\npatch");

        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert_eq!(body.messages[0].content, "instruction:\n\npatch");
    }

    #[test]
    fn test_request_body_carries_generation_params() {
        let body = backend().request_body("p");

        assert_eq!(body.model.as_deref(), Some("gpt-3.5-turbo"));
        assert_eq!(body.temperature, Some(1.0));
        assert_eq!(body.top_p, Some(1.0));
        assert_eq!(body.max_tokens, Some(512));
    }

    #[tokio::test]
    async fn test_send_rejects_unreachable_base_url() {
        let config = ReviewConfig {
            openai_api_base: "http://127.0.0.1:1/v1".to_string(),
            ..ReviewConfig::default()
        };
        let backend = OpenAiBackend::new("sk-test".to_string(), &config);

        let result = backend.send("patch").await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
