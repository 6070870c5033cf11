//! # storefront-relay
//!
//! Keeps the Anthropic and Stripe secrets server-side for a static storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ANTHROPIC_API_KEY=sk-ant-...
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! storefront-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    if state.messages.is_configured() {
        info!("Anthropic relay: configured (version {})", state.messages.config().api_version);
    } else {
        warn!("ANTHROPIC_API_KEY not set, /api/v1/messages will answer 500");
    }
    if state.checkout.is_configured() {
        info!(
            "Stripe checkout: configured ({} mode)",
            if state.checkout.config().is_live_mode() { "live" } else { "test" }
        );
    } else {
        warn!("STRIPE_SECRET_KEY not set, /api/v1/checkout will answer 500");
    }

    // Create router
    let app = routes::create_router(state);

    info!("storefront-relay v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Messages: POST http://{}/api/v1/messages", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Text logs by default, JSON lines with `LOG_FORMAT=json`
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
