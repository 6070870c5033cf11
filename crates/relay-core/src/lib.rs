//! # relay-core
//!
//! Core types for the storefront-relay endpoints.
//!
//! This crate provides:
//! - `RelayError` for typed error handling at the handler boundary
//! - `Cart` and `CartSummary` for the checkout payload and its reduction
//!   to a single line item
//! - `Storefront` and `Currency` for the fixed merchant settings applied
//!   to every checkout
//!
//! ## Example
//!
//! ```rust
//! use relay_core::{Cart, Storefront};
//! use serde_json::json;
//!
//! let storefront = Storefront::default();
//! let cart = Cart::from_value(json!({
//!     "items": [{ "title": "Book A" }, { "title": "Book B" }],
//!     "total": "19.99"
//! }))
//! .unwrap();
//!
//! let summary = cart.summarize(storefront.currency).unwrap();
//! assert_eq!(summary.amount, 1999);
//! assert_eq!(summary.description, "Book A, Book B");
//! ```

pub mod cart;
pub mod error;
pub mod storefront;

// Re-exports for convenience
pub use cart::{Cart, CartItem, CartSummary, INVALID_CART_MESSAGE, MAX_AMOUNT};
pub use error::{RelayError, RelayResult};
pub use storefront::{Currency, Storefront};
