//! # relay-anthropic
//!
//! Credential-injecting relay for the Anthropic Messages API.
//!
//! The browser never sees the API key: it posts a Messages request body to
//! us, we attach `x-api-key` and `anthropic-version`, and hand back whatever
//! status and JSON body Anthropic answered with.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_anthropic::{AnthropicConfig, MessagesRelay};
//!
//! let relay = MessagesRelay::new(AnthropicConfig::from_env())?;
//!
//! let relayed = relay.forward(&payload).await?;
//! // relayed.status / relayed.body go straight back to the caller
//! ```

pub mod config;
pub mod messages;

// Re-exports
pub use config::AnthropicConfig;
pub use messages::{MessagesRelay, RelayedResponse, API_KEY_NOT_CONFIGURED};
