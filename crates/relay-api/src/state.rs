//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the two relays, each with its own credentials and HTTP client.
//! Everything is immutable after startup.

use relay_anthropic::MessagesRelay;
use relay_core::Storefront;
use relay_stripe::StripeCheckout;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit storefront settings file (`STOREFRONT_CONFIG`)
    pub storefront_path: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            storefront_path: std::env::var("STOREFRONT_CONFIG").ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            storefront_path: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Credential-injecting Messages relay
    pub messages: Arc<MessagesRelay>,
    /// Cart-to-session builder
    pub checkout: Arc<StripeCheckout>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state from the process environment and storefront file
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let storefront = load_storefront(config.storefront_path.as_deref())?;

        let messages = MessagesRelay::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Anthropic relay: {}", e))?;
        let checkout = StripeCheckout::from_env(storefront)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe checkout: {}", e))?;

        Ok(Self::from_parts(config, messages, checkout))
    }

    /// Build state from already-configured relays
    pub fn from_parts(config: AppConfig, messages: MessagesRelay, checkout: StripeCheckout) -> Self {
        Self {
            messages: Arc::new(messages),
            checkout: Arc::new(checkout),
            config,
        }
    }
}

/// Load storefront settings from a TOML file.
///
/// An explicit path must exist. Without one, the usual config locations are
/// tried and the built-in defaults are used if none is found.
pub fn load_storefront(explicit_path: Option<&str>) -> anyhow::Result<Storefront> {
    if let Some(path) = explicit_path {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        return parse_storefront(path, &content);
    }

    let config_paths = [
        "config/storefront.toml",
        "../config/storefront.toml",
        "../../config/storefront.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            return parse_storefront(path, &content);
        }
    }

    tracing::warn!("No storefront config found, using defaults");
    Ok(Storefront::default())
}

fn parse_storefront(path: &str, content: &str) -> anyhow::Result<Storefront> {
    let storefront = Storefront::from_toml_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
    tracing::info!(
        "Loaded storefront from {}: product={:?}, currency={}",
        path,
        storefront.product_name,
        storefront.currency
    );
    Ok(storefront)
}
