//! # Storefront Settings
//!
//! Fixed merchant settings applied to every checkout session.
//! Loaded from `config/storefront.toml`; any field left out of the file
//! falls back to the defaults below.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (cents, etc.)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Merchant settings for the hosted checkout page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storefront {
    /// Label shown as the single line item's product name
    pub product_name: String,

    /// Currency every cart total is charged in
    pub currency: Currency,

    /// URL to redirect after successful payment
    pub success_url: String,

    /// URL to redirect if the customer cancels
    pub cancel_url: String,

    /// ISO country codes accepted for shipping
    pub allowed_countries: Vec<String>,

    /// Stripe billing address collection mode ("auto" or "required")
    pub billing_address_collection: String,

    /// Metadata key carrying the joined item titles
    pub metadata_key: String,

    /// Stripe caps metadata values at 500 characters
    pub metadata_limit: usize,
}

impl Default for Storefront {
    fn default() -> Self {
        Self {
            product_name: "O&A Books Order".to_string(),
            currency: Currency::USD,
            success_url: "https://oandabooks.com/?payment=success".to_string(),
            cancel_url: "https://oandabooks.com/?payment=cancelled".to_string(),
            allowed_countries: vec!["US".to_string()],
            billing_address_collection: "auto".to_string(),
            metadata_key: "books".to_string(),
            metadata_limit: 500,
        }
    }
}

impl Storefront {
    /// Parse storefront settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
