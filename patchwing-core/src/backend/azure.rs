//! Azure OpenAI chat completion backend (alternate provider)

use reqwest::Client;
use tracing::debug;

use crate::{Error, Result};

use super::wire::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// API version sent with every deployment request
const AZURE_API_VERSION: &str = "2024-02-01";

/// Client for an Azure OpenAI deployment
///
/// Azure routes requests to a named deployment under the resource endpoint
/// and authenticates with an `api-key` header instead of a bearer token.
#[derive(Clone)]
pub struct AzureBackend {
    http: Client,
    endpoint: String,
    api_key: String,
    deployment: String,
}

impl AzureBackend {
    /// Create a backend bound to a resource endpoint and deployment id
    pub fn new(endpoint: String, api_key: String, deployment: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            api_key,
            deployment,
        }
    }

    /// Send the instruction as a system message and the patch as a user
    /// message, returning the first choice's content
    ///
    /// A choice without content resolves to an empty string, not an error.
    pub async fn send(&self, instruction: &str, patch: &str) -> Result<String> {
        let url = self.completions_url();
        let body = ChatCompletionRequest {
            // Deployment is addressed in the URL, not the body
            model: None,
            messages: Self::build_messages(instruction, patch),
            temperature: None,
            top_p: None,
            max_tokens: None,
        };

        debug!(deployment = %self.deployment, url = %url, "Sending chat completion request");

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "deployment {} request failed: {} {}",
                self.deployment, status, text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        Ok(completion.first_content())
    }

    /// The two-message structure Azure receives: system instruction, then
    /// the patch as the user turn
    pub(crate) fn build_messages(instruction: &str, patch: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::system(instruction), ChatMessage::user(patch)]
    }

    /// Chat completions URL for the configured deployment
    pub(crate) fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            AZURE_API_VERSION
        )
    }
}

impl std::fmt::Debug for AzureBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBackend")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .finish_non_exhaustive()
    }
}
