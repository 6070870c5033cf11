//! # relay-stripe
//!
//! Stripe Checkout Session builder for storefront-relay.
//!
//! A posted cart becomes one dynamically priced line item:
//! - the cart total, in minor units, is the unit amount
//! - the joined item titles are the product description
//! - product name, currency, redirect URLs and shipping countries come from
//!   the configured `Storefront`
//!
//! No products need to be registered in Stripe beforehand.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_core::{Cart, Storefront};
//! use relay_stripe::{StripeCheckout, StripeConfig};
//!
//! let checkout = StripeCheckout::new(StripeConfig::from_env(), Storefront::default())?;
//!
//! let redirect = checkout.create_session(&cart).await?;
//! // Send the customer to redirect.url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{CheckoutRedirect, StripeCheckout, STRIPE_NOT_CONFIGURED};
pub use config::StripeConfig;
