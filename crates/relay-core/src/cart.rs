//! # Cart Payload
//!
//! The cart posted by the storefront and its reduction to the single
//! dynamically priced line item sent to the payment provider.

use crate::error::{RelayError, RelayResult};
use crate::storefront::Currency;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message returned for every cart that fails validation
pub const INVALID_CART_MESSAGE: &str = "Invalid cart data";

/// Separator used when joining item titles into the description
pub const TITLE_SEPARATOR: &str = ", ";

/// Largest amount Stripe accepts for a single line item, in minor units
pub const MAX_AMOUNT: i64 = 99_999_999;

/// An item in the posted cart.
///
/// Any JSON value is accepted; items that are not objects have no title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct CartItem {
    /// Display title as posted; strings, numbers and booleans are joined
    pub title: Option<Value>,

    /// Remaining storefront fields (price, cover, id), carried but unused
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            extra: Map::new(),
        }
    }

    /// Title as it appears in the joined description
    pub fn display_title(&self) -> String {
        match &self.title {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<Value> for CartItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => {
                let title = fields.remove("title");
                Self {
                    title,
                    extra: fields,
                }
            }
            _ => Self::default(),
        }
    }
}

/// Cart payload for the checkout endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cart {
    /// Items to purchase, in display order
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Cart total as a decimal number or numeric string
    #[serde(default)]
    pub total: Value,

    /// Shipping flag; accepted but not used when building the session
    #[serde(default)]
    pub shipping: Value,
}

/// Validated cart reduced to what the checkout session needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Item titles joined with ", "
    pub description: String,
    /// Total in the smallest currency unit
    pub amount: i64,
}

impl Cart {
    /// Deserialize a cart from an already-parsed JSON body.
    ///
    /// Anything that is valid JSON but not cart-shaped is an invalid cart.
    pub fn from_value(value: Value) -> RelayResult<Self> {
        serde_json::from_value(value).map_err(|_| invalid_cart())
    }

    /// Item titles joined with ", "
    pub fn description(&self) -> String {
        self.items
            .iter()
            .map(CartItem::display_title)
            .collect::<Vec<_>>()
            .join(TITLE_SEPARATOR)
    }

    /// Validate the cart and compute the single line item it checks out as.
    ///
    /// Rejects an empty item list and a total that is missing, null, zero,
    /// negative, non-finite, not numeric, or above `MAX_AMOUNT`.
    pub fn summarize(&self, currency: Currency) -> RelayResult<CartSummary> {
        if self.items.is_empty() {
            return Err(invalid_cart());
        }

        let total = parse_total(&self.total).ok_or_else(invalid_cart)?;

        let amount = currency.to_smallest_unit(total);
        if !(1..=MAX_AMOUNT).contains(&amount) {
            return Err(invalid_cart());
        }

        Ok(CartSummary {
            description: self.description(),
            amount,
        })
    }
}

impl CartSummary {
    /// Description cut to at most `limit` characters for provider metadata
    pub fn truncated_description(&self, limit: usize) -> String {
        self.description.chars().take(limit).collect()
    }
}

fn invalid_cart() -> RelayError {
    RelayError::InvalidInput(INVALID_CART_MESSAGE.to_string())
}

fn parse_total(total: &Value) -> Option<f64> {
    let amount = match total {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (amount.is_finite() && amount > 0.0).then_some(amount)
}
