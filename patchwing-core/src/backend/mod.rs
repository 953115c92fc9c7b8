//! Chat-completion backends
//!
//! Exactly two providers are supported: an OpenAI-compatible API (primary)
//! and an Azure OpenAI deployment (alternate). Which one is active is
//! decided once, from configuration, and never re-evaluated per call.

mod azure;
mod openai;
mod wire;

pub use azure::AzureBackend;
pub use openai::OpenAiBackend;
pub use wire::{
    AssistantMessage, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};

use crate::config::ReviewConfig;

/// The active chat-completion backend, fixed at construction
#[derive(Debug, Clone)]
pub enum Backend {
    /// OpenAI-compatible provider (primary)
    OpenAi(OpenAiBackend),
    /// Azure OpenAI deployment (alternate)
    Azure(AzureBackend),
    /// No provider credentials were configured
    Unconfigured,
}

impl Backend {
    /// Select a backend from the resolved configuration
    ///
    /// The primary provider wins whenever its key is present, regardless of
    /// any Azure configuration. With neither credential set this returns
    /// `Unconfigured` rather than an error; the unusable state surfaces as
    /// an empty review at call time.
    pub fn from_config(config: &ReviewConfig) -> Self {
        if let Some(api_key) = config.openai_api_key.as_deref() {
            return Backend::OpenAi(OpenAiBackend::new(api_key.to_string(), config));
        }

        if let (Some(api_key), Some(endpoint)) = (
            config.azure_api_key.as_deref(),
            config.azure_endpoint.as_deref(),
        ) {
            return Backend::Azure(AzureBackend::new(
                endpoint.to_string(),
                api_key.to_string(),
                config.model.clone(),
            ));
        }

        Backend::Unconfigured
    }

    /// Short backend name for log fields
    pub fn name(&self) -> &'static str {
        match self {
            Backend::OpenAi(_) => "openai",
            Backend::Azure(_) => "azure",
            Backend::Unconfigured => "unconfigured",
        }
    }

    /// Whether any provider is configured
    pub fn is_configured(&self) -> bool {
        !matches!(self, Backend::Unconfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(
        openai_key: Option<&str>,
        azure_key: Option<&str>,
        azure_endpoint: Option<&str>,
    ) -> ReviewConfig {
        ReviewConfig {
            openai_api_key: openai_key.map(String::from),
            azure_api_key: azure_key.map(String::from),
            azure_endpoint: azure_endpoint.map(String::from),
            ..ReviewConfig::default()
        }
    }

    #[test]
    fn test_no_credentials_selects_unconfigured() {
        let backend = Backend::from_config(&config_with(None, None, None));
        assert!(matches!(backend, Backend::Unconfigured));
        assert!(!backend.is_configured());
    }

    #[test]
    fn test_openai_key_selects_primary() {
        let backend = Backend::from_config(&config_with(Some("sk-test"), None, None));
        assert!(matches!(backend, Backend::OpenAi(_)));
        assert_eq!(backend.name(), "openai");
    }

    #[test]
    fn test_azure_pair_selects_alternate() {
        let backend = Backend::from_config(&config_with(
            None,
            Some("az-test"),
            Some("https://r.openai.azure.com"),
        ));
        assert!(matches!(backend, Backend::Azure(_)));
        assert_eq!(backend.name(), "azure");
    }

    #[test]
    fn test_azure_key_without_endpoint_is_unconfigured() {
        let backend = Backend::from_config(&config_with(None, Some("az-test"), None));
        assert!(matches!(backend, Backend::Unconfigured));
    }

    #[test]
    fn test_azure_endpoint_without_key_is_unconfigured() {
        let backend =
            Backend::from_config(&config_with(None, None, Some("https://r.openai.azure.com")));
        assert!(matches!(backend, Backend::Unconfigured));
    }

    #[test]
    fn test_primary_takes_precedence_over_alternate() {
        let backend = Backend::from_config(&config_with(
            Some("sk-test"),
            Some("az-test"),
            Some("https://r.openai.azure.com"),
        ));
        assert!(matches!(backend, Backend::OpenAi(_)));
    }
}
