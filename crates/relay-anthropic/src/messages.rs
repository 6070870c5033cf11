//! # Messages Relay
//!
//! Forwards a Messages API request body verbatim with the server-held key
//! attached. Upstream non-success statuses are relayed, not treated as
//! errors: the caller gets exactly what Anthropic said.

use crate::config::AnthropicConfig;
use relay_core::{RelayError, RelayResult};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Error message returned when no API key is configured
pub const API_KEY_NOT_CONFIGURED: &str = "API key not configured";

const PROVIDER: &str = "anthropic";

/// Upstream status and body, relayed unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedResponse {
    pub status: u16,
    pub body: Value,
}

/// Credential-injecting relay for `POST /v1/messages`
pub struct MessagesRelay {
    config: AnthropicConfig,
    client: Client,
}

impl MessagesRelay {
    /// Create a new relay with its own pooled HTTP client
    pub fn new(config: AnthropicConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        Self::new(AnthropicConfig::from_env())
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    /// Check if an API key is present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Full URL of the message-creation endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.api_base_url)
    }

    /// Forward a parsed request body and relay the upstream answer.
    ///
    /// Exactly one outbound call is made; there are no retries.
    #[instrument(skip(self, payload), fields(model = payload.get("model").and_then(|m| m.as_str())))]
    pub async fn forward(&self, payload: &Value) -> RelayResult<RelayedResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| RelayError::MisconfiguredCredential(API_KEY_NOT_CONFIGURED.to_string()))?;

        let timeout_secs = self.config.timeout.as_secs();

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::transport(PROVIDER, timeout_secs, e.is_timeout(), e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::transport(PROVIDER, timeout_secs, e.is_timeout(), e.to_string()))?;

        let body: Value = serde_json::from_slice(&bytes)?;

        if status.is_success() {
            debug!("Anthropic responded: status={}", status);
        } else {
            warn!("Anthropic returned non-success status, relaying as-is: status={}", status);
        }

        Ok(RelayedResponse {
            status: status.as_u16(),
            body,
        })
    }
}
