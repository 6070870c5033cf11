//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! The secret key is loaded from the environment once at startup.

use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Pinned API version; the account default applies when unset
    pub api_version: Option<String>,

    /// Upper bound on a single upstream call
    pub timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// - `STRIPE_SECRET_KEY` (optional; empty counts as unset)
    /// - `STRIPE_API_VERSION` (optional)
    /// - `STRIPE_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_version = env::var("STRIPE_API_VERSION")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let timeout_secs = env::var("STRIPE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            secret_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            ..Self::unconfigured()
        }
    }

    /// Config with no secret key
    pub fn unconfigured() -> Self {
        Self {
            secret_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check if a secret key is present
    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .is_some_and(|key| key.starts_with("sk_live_"))
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> Option<String> {
        self.secret_key
            .as_ref()
            .map(|key| format!("Bearer {}", key))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: pin an API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Builder: set upstream timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
