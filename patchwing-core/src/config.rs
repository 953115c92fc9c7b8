//! Configuration management for Patchwing
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (provider credentials + PATCHWING_*)
//! 3. Config file (~/.config/patchwing/config.toml)
//! 4. Default values
//!
//! Provider credentials use the conventional variable names
//! (`OPENAI_API_KEY`, `AZURE_OPENAI_API_KEY`, ...) so existing shell setups
//! keep working; everything else is namespaced under `PATCHWING_`.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Default base URL for the OpenAI-compatible provider
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default model identifier (also used as the Azure deployment id)
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Review configuration, resolved once at startup
///
/// Every option the requester consults lives here; nothing is read from the
/// environment after construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// API key for the OpenAI-compatible provider (primary)
    pub openai_api_key: Option<String>,

    /// Base URL for the OpenAI-compatible provider
    pub openai_api_base: String,

    /// API key for the Azure OpenAI provider (alternate)
    pub azure_api_key: Option<String>,

    /// Resource endpoint for the Azure OpenAI provider, e.g.
    /// `https://my-resource.openai.azure.com`
    pub azure_endpoint: Option<String>,

    /// Model identifier; doubles as the Azure deployment id
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling probability
    pub top_p: f32,

    /// Maximum output tokens; `None` leaves the cap to the provider
    pub max_tokens: Option<u32>,

    /// Language the review should be written in, e.g. "Spanish"
    pub language: Option<String>,

    /// Custom review instruction; `None` uses the built-in one
    pub prompt: Option<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            azure_api_key: None,
            azure_endpoint: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
            top_p: 1.0,
            max_tokens: None,
            language: None,
            prompt: None,
        }
    }
}

impl ReviewConfig {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/patchwing/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("patchwing").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - OPENAI_API_KEY: primary provider key
    /// - OPENAI_API_ENDPOINT: primary provider base URL
    /// - AZURE_OPENAI_API_KEY: alternate provider key
    /// - AZURE_OPENAI_ENDPOINT: alternate provider endpoint
    /// - PATCHWING_MODEL: model / deployment identifier
    /// - PATCHWING_TEMPERATURE, PATCHWING_TOP_P, PATCHWING_MAX_TOKENS
    /// - PATCHWING_LANGUAGE: answer language
    /// - PATCHWING_PROMPT: custom review instruction
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_string("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }

        if let Some(base) = env_string("OPENAI_API_ENDPOINT") {
            self.openai_api_base = base;
        }

        if let Some(key) = env_string("AZURE_OPENAI_API_KEY") {
            self.azure_api_key = Some(key);
        }

        if let Some(endpoint) = env_string("AZURE_OPENAI_ENDPOINT") {
            self.azure_endpoint = Some(endpoint);
        }

        if let Some(model) = env_string("PATCHWING_MODEL") {
            self.model = model;
        }

        if let Some(temperature) = env_parsed("PATCHWING_TEMPERATURE") {
            self.temperature = temperature;
        }

        if let Some(top_p) = env_parsed("PATCHWING_TOP_P") {
            self.top_p = top_p;
        }

        if let Some(max_tokens) = env_parsed("PATCHWING_MAX_TOKENS") {
            self.max_tokens = Some(max_tokens);
        }

        if let Some(language) = env_string("PATCHWING_LANGUAGE") {
            self.language = Some(language);
        }

        if let Some(prompt) = env_string("PATCHWING_PROMPT") {
            self.prompt = Some(prompt);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        model: Option<String>,
        language: Option<String>,
        prompt: Option<String>,
    ) -> Self {
        if let Some(m) = model {
            self.model = m;
        }

        if let Some(l) = language {
            self.language = Some(l);
        }

        if let Some(p) = prompt {
            self.prompt = Some(p);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        model: Option<String>,
        language: Option<String>,
        prompt: Option<String>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(model, language, prompt))
    }
}

/// Read an environment variable as a trimmed, non-empty string
fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable, warning on unparsable values
///
/// An unparsable value keeps the existing (default) setting rather than
/// aborting startup.
fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    let raw = env_string(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}
