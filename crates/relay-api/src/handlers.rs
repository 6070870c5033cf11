//! # Request Handlers
//!
//! Axum request handlers for the two relay endpoints.
//! Bodies are taken as raw bytes and parsed here, so malformed JSON lands in
//! the same `{"error": ...}` path as every other failure.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use relay_anthropic::{RelayedResponse, API_KEY_NOT_CONFIGURED};
use relay_core::{Cart, RelayError, RelayResult};
use relay_stripe::CheckoutRedirect;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Checkout URL (redirect user here)
    pub url: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn relay_error_to_response(err: RelayError) -> Response {
    if matches!(err, RelayError::MethodNotAllowed) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"))],
            err.to_string(),
        )
            .into_response();
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "messages_configured": state.messages.is_configured(),
        "checkout_configured": state.checkout.is_configured()
    }))
}

/// CORS preflight: empty success, headers come from the router layer
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any verb other than POST or OPTIONS
pub async fn method_not_allowed() -> Response {
    relay_error_to_response(RelayError::MethodNotAllowed)
}

/// Relay a Messages request to Anthropic with the server-held key
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn relay_messages(State(state): State<AppState>, body: Bytes) -> Response {
    match relay_messages_internal(&state, &body).await {
        Ok(relayed) => {
            let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(relayed.body)).into_response()
        }
        Err(e) => {
            error!("Message relay failed: {}", e);
            relay_error_to_response(e)
        }
    }
}

async fn relay_messages_internal(state: &AppState, body: &[u8]) -> RelayResult<RelayedResponse> {
    if !state.messages.is_configured() {
        return Err(RelayError::MisconfiguredCredential(
            API_KEY_NOT_CONFIGURED.to_string(),
        ));
    }

    let payload: Value = serde_json::from_slice(body)?;
    state.messages.forward(&payload).await
}

/// Create a hosted checkout session from a cart
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn create_checkout(State(state): State<AppState>, body: Bytes) -> Response {
    match create_checkout_internal(&state, &body).await {
        Ok(redirect) => Json(CheckoutResponse { url: redirect.url }).into_response(),
        Err(e) => {
            if e.is_client_error() {
                warn!("Rejected checkout: {}", e);
            } else {
                error!("Failed to create checkout: {}", e);
            }
            relay_error_to_response(e)
        }
    }
}

async fn create_checkout_internal(state: &AppState, body: &[u8]) -> RelayResult<CheckoutRedirect> {
    let payload: Value = serde_json::from_slice(body)?;
    let cart = Cart::from_value(payload)?;

    info!("Creating checkout: {} items", cart.items.len());

    state.checkout.create_session(&cart).await
}
