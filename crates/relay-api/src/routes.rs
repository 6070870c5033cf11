//! # Routes
//!
//! Axum router configuration for the relay API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Create the main application router
///
/// Routes:
/// - API v1 (POST, OPTIONS preflight, 405 for anything else):
///   - /api/v1/messages - Relay a Messages request to Anthropic
///   - /api/v1/checkout - Create a Stripe Checkout Session from a cart
///
/// - Health:
///   - GET /health
///   - GET /
///
/// Every response carries permissive CORS headers, including preflights and
/// rejections.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/messages",
            post(handlers::relay_messages)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/checkout",
            post(handlers::create_checkout)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        );

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
