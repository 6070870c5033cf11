//! # relay-api
//!
//! HTTP API layer for storefront-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The credential-injecting Messages relay endpoint
//! - The cart-to-Checkout-Session endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/messages` | Relay a Messages request to Anthropic |
//! | POST | `/api/v1/checkout` | Create a Stripe Checkout Session from a cart |
//! | OPTIONS | `/api/v1/*` | CORS preflight |
//!
//! Any other verb on the two API paths is answered with a plain-text 405.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
