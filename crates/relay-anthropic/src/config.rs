//! # Anthropic Configuration
//!
//! Configuration for the Messages relay.
//! The API key is read once at startup and handed to the relay; a missing
//! key is not fatal, the relay answers every request with a 500 instead.

use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Anthropic API configuration
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// Server-held API key (`ANTHROPIC_API_KEY`)
    pub api_key: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Value sent in the `anthropic-version` header
    pub api_version: String,

    /// Upper bound on a single upstream call
    pub timeout: Duration,
}

impl AnthropicConfig {
    /// Load configuration from environment variables.
    ///
    /// - `ANTHROPIC_API_KEY` (optional; empty counts as unset)
    /// - `ANTHROPIC_VERSION` (default `2023-06-01`)
    /// - `ANTHROPIC_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_version =
            env::var("ANTHROPIC_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let timeout_secs = env::var("ANTHROPIC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Create config with an explicit key (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::unconfigured()
        }
    }

    /// Config with no API key
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check if an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set upstream timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
