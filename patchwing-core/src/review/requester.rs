//! The review operation
//!
//! `ReviewRequester` owns the backend selected at construction and exposes
//! one async operation: send a patch, get review text back. Missing input
//! and missing credentials both resolve to an empty review rather than an
//! error; transport failures propagate untouched.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::backend::Backend;
use crate::config::ReviewConfig;
use crate::review::prompt::{combined_prompt, review_instruction};
use crate::Result;

/// Callback invoked with the duration of each review call
///
/// Diagnostic only; fires on success and failure alike.
pub type TimingHook = Box<dyn Fn(Duration) + Send + Sync>;

/// Requests a code review from the configured chat-completion backend
///
/// Backend selection happens once, in `new`; the instance never re-reads
/// configuration. Concurrent calls on the same instance are independent:
/// nothing mutable is shared between them.
pub struct ReviewRequester {
    backend: Backend,
    instruction: String,
    timing_hook: Option<TimingHook>,
}

impl ReviewRequester {
    /// Create a requester from resolved configuration
    ///
    /// The primary provider is selected when its key is present, else the
    /// alternate provider when its key/endpoint pair is present, else the
    /// requester is unconfigured and every call returns an empty review.
    pub fn new(config: &ReviewConfig) -> Self {
        let backend = Backend::from_config(config);

        debug!(backend = backend.name(), "Selected review backend");

        Self {
            backend,
            instruction: review_instruction(config.prompt.as_deref(), config.language.as_deref()),
            timing_hook: None,
        }
    }

    /// Install a duration-reporting hook for call timing
    pub fn with_timing_hook(mut self, hook: TimingHook) -> Self {
        self.timing_hook = Some(hook);
        self
    }

    /// The backend this requester is bound to
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Whether any provider is configured
    pub fn is_configured(&self) -> bool {
        self.backend.is_configured()
    }

    /// The instruction text sent with every review
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Request a review of a patch
    ///
    /// Returns an empty string for an empty patch (no backend call) and for
    /// an unconfigured requester. Backend failures are returned as-is; this
    /// method adds no retries or timeouts.
    pub async fn code_review(&self, patch: &str) -> Result<String> {
        if patch.is_empty() {
            return Ok(String::new());
        }

        let started = Instant::now();

        let result = match &self.backend {
            Backend::OpenAi(backend) => {
                backend.send(&combined_prompt(&self.instruction, patch)).await
            }
            Backend::Azure(backend) => backend.send(&self.instruction, patch).await,
            Backend::Unconfigured => {
                debug!("No review backend configured, returning empty review");
                Ok(String::new())
            }
        };

        let elapsed = started.elapsed();
        if let Some(ref hook) = self.timing_hook {
            hook(elapsed);
        }
        debug!(
            backend = self.backend.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            ok = result.is_ok(),
            "Code review call finished"
        );

        result
    }
}

impl std::fmt::Debug for ReviewRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewRequester")
            .field("backend", &self.backend.name())
            .field("instruction", &self.instruction)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unconfigured() -> ReviewRequester {
        ReviewRequester::new(&ReviewConfig::default())
    }

    fn with_openai_key() -> ReviewRequester {
        let config = ReviewConfig {
            openai_api_key: Some("sk-test".to_string()),
            // Unroutable address; tests that reach the network are a bug
            openai_api_base: "http://127.0.0.1:1/v1".to_string(),
            ..ReviewConfig::default()
        };
        ReviewRequester::new(&config)
    }

    #[tokio::test]
    async fn test_empty_patch_returns_empty_review() {
        let review = unconfigured().code_review("").await.unwrap();
        assert_eq!(review, "");
    }

    #[tokio::test]
    async fn test_empty_patch_skips_backend_entirely() {
        // A configured backend with an unroutable base URL would error if
        // contacted; the empty patch must short-circuit before that.
        let review = with_openai_key().code_review("").await.unwrap();
        assert_eq!(review, "");
    }

    #[tokio::test]
    async fn test_unconfigured_returns_empty_review_for_any_patch() {
        let review = unconfigured()
            .code_review("diff --git a/src/main.rs b/src/main.rs")
            .await
            .unwrap();
        assert_eq!(review, "");
    }

    #[test]
    fn test_primary_selected_when_both_providers_configured() {
        let config = ReviewConfig {
            openai_api_key: Some("sk-test".to_string()),
            azure_api_key: Some("az-test".to_string()),
            azure_endpoint: Some("https://r.openai.azure.com".to_string()),
            ..ReviewConfig::default()
        };
        let requester = ReviewRequester::new(&config);
        assert!(matches!(requester.backend(), Backend::OpenAi(_)));
    }

    #[test]
    fn test_instruction_reflects_config() {
        let config = ReviewConfig {
            prompt: Some("Review carefully".to_string()),
            language: Some("Spanish".to_string()),
            ..ReviewConfig::default()
        };
        let requester = ReviewRequester::new(&config);

        assert!(requester.instruction().starts_with("Review carefully"));
        assert_eq!(
            requester
                .instruction()
                .matches("Answer me in Spanish,")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_timing_hook_fires_on_unconfigured_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let requester = unconfigured().with_timing_hook(Box::new(move |_elapsed| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        requester.code_review("some patch").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timing_hook_fires_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let requester = with_openai_key().with_timing_hook(Box::new(move |_elapsed| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let result = requester.code_review("some patch").await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timing_hook_not_fired_for_empty_patch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let requester = unconfigured().with_timing_hook(Box::new(move |_elapsed| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        requester.code_review("").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debug_does_not_leak_credentials() {
        let config = ReviewConfig {
            openai_api_key: Some("sk-secret".to_string()),
            ..ReviewConfig::default()
        };
        let requester = ReviewRequester::new(&config);
        let output = format!("{:?}", requester);
        assert!(!output.contains("sk-secret"));
    }
}
