//! # Stripe Checkout Sessions
//!
//! Builds a hosted Checkout Session from a posted cart.
//! The whole cart is sent as one line item priced at the cart total, so
//! nothing has to be pre-registered in the Stripe dashboard.

use crate::config::StripeConfig;
use relay_core::{Cart, CartSummary, RelayError, RelayResult, Storefront};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Error message returned when no secret key is configured
pub const STRIPE_NOT_CONFIGURED: &str = "Payment provider not configured";

const PROVIDER: &str = "stripe";
const FALLBACK_ERROR_MESSAGE: &str = "Stripe error";

/// Hosted checkout page the customer should be redirected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub session_id: Option<String>,
    pub url: String,
}

/// Stripe Checkout Session builder
pub struct StripeCheckout {
    config: StripeConfig,
    storefront: Storefront,
    client: Client,
}

impl StripeCheckout {
    /// Create a new checkout builder with its own pooled HTTP client
    pub fn new(config: StripeConfig, storefront: Storefront) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            storefront,
            client,
        })
    }

    /// Create from environment variables
    pub fn from_env(storefront: Storefront) -> RelayResult<Self> {
        Self::new(StripeConfig::from_env(), storefront)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Check if a secret key is present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Form fields for the session-creation call
    pub fn build_form(&self, summary: &CartSummary) -> Vec<(String, String)> {
        let storefront = &self.storefront;

        let mut form_params: Vec<(String, String)> = vec![
            ("payment_method_types[]".to_string(), "card".to_string()),
            ("mode".to_string(), "payment".to_string()),
            (
                "line_items[0][price_data][currency]".to_string(),
                storefront.currency.as_str().to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                summary.amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                storefront.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                summary.description.clone(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), storefront.success_url.clone()),
            ("cancel_url".to_string(), storefront.cancel_url.clone()),
        ];

        for country in &storefront.allowed_countries {
            form_params.push((
                "shipping_address_collection[allowed_countries][]".to_string(),
                country.clone(),
            ));
        }

        form_params.push((
            "billing_address_collection".to_string(),
            storefront.billing_address_collection.clone(),
        ));
        form_params.push((
            format!("metadata[{}]", storefront.metadata_key),
            summary.truncated_description(storefront.metadata_limit),
        ));

        form_params
    }

    /// Validate the cart and create a Checkout Session for it.
    ///
    /// Makes at most one outbound call, and none when the key is missing or
    /// the cart is invalid.
    #[instrument(skip(self, cart), fields(items = cart.items.len()))]
    pub async fn create_session(&self, cart: &Cart) -> RelayResult<CheckoutRedirect> {
        let summary = cart.summarize(self.storefront.currency)?;

        let auth_header = self.config.auth_header().ok_or_else(|| {
            RelayError::MisconfiguredCredential(STRIPE_NOT_CONFIGURED.to_string())
        })?;

        debug!(
            "Creating Stripe checkout session: amount={}, currency={}, shipping={}",
            summary.amount, self.storefront.currency, cart.shipping
        );

        let form_params = self.build_form(&summary);
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let timeout_secs = self.config.timeout.as_secs();

        let mut request = self
            .client
            .post(&url)
            .header("Authorization", auth_header)
            .header("Idempotency-Key", Uuid::new_v4().to_string());

        if let Some(ref version) = self.config.api_version {
            request = request.header("Stripe-Version", version);
        }

        let response = request
            .form(&form_params)
            .send()
            .await
            .map_err(|e| RelayError::transport(PROVIDER, timeout_secs, e.is_timeout(), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::transport(PROVIDER, timeout_secs, e.is_timeout(), e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

            return Err(RelayError::UpstreamFailure {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::Parse(format!("Failed to parse Stripe response: {}", e)))?;

        let url = session.url.ok_or_else(|| {
            RelayError::Parse("Stripe response did not include a checkout url".to_string())
        })?;

        info!(
            "Created Stripe checkout session: id={}, amount={}",
            session.id.as_deref().unwrap_or("unknown"),
            summary.amount
        );

        Ok(CheckoutRedirect {
            session_id: session.id,
            url,
        })
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::Currency;

    fn checkout(storefront: Storefront) -> StripeCheckout {
        StripeCheckout::new(StripeConfig::new("sk_test_abc123"), storefront).unwrap()
    }

    fn field<'a>(form: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        form.iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_build_form_single_line_item() {
        let summary = CartSummary {
            description: "Book A, Book B".to_string(),
            amount: 1999,
        };
        let form = checkout(Storefront::default()).build_form(&summary);

        assert_eq!(field(&form, "payment_method_types[]"), vec!["card"]);
        assert_eq!(field(&form, "mode"), vec!["payment"]);
        assert_eq!(field(&form, "line_items[0][price_data][currency]"), vec!["usd"]);
        assert_eq!(field(&form, "line_items[0][price_data][unit_amount]"), vec!["1999"]);
        assert_eq!(
            field(&form, "line_items[0][price_data][product_data][name]"),
            vec!["O&A Books Order"]
        );
        assert_eq!(
            field(&form, "line_items[0][price_data][product_data][description]"),
            vec!["Book A, Book B"]
        );
        assert_eq!(field(&form, "line_items[0][quantity]"), vec!["1"]);
        assert_eq!(
            field(&form, "success_url"),
            vec!["https://oandabooks.com/?payment=success"]
        );
        assert_eq!(
            field(&form, "cancel_url"),
            vec!["https://oandabooks.com/?payment=cancelled"]
        );
        assert_eq!(
            field(&form, "shipping_address_collection[allowed_countries][]"),
            vec!["US"]
        );
        assert_eq!(field(&form, "billing_address_collection"), vec!["auto"]);
        assert_eq!(field(&form, "metadata[books]"), vec!["Book A, Book B"]);
    }

    #[test]
    fn test_build_form_follows_storefront() {
        let mut storefront = Storefront::default();
        storefront.currency = Currency::EUR;
        storefront.allowed_countries = vec!["DE".to_string(), "AT".to_string()];
        storefront.metadata_key = "titles".to_string();
        storefront.metadata_limit = 4;

        let summary = CartSummary {
            description: "Faust, Woyzeck".to_string(),
            amount: 2450,
        };
        let form = checkout(storefront).build_form(&summary);

        assert_eq!(field(&form, "line_items[0][price_data][currency]"), vec!["eur"]);
        assert_eq!(
            field(&form, "shipping_address_collection[allowed_countries][]"),
            vec!["DE", "AT"]
        );
        assert_eq!(field(&form, "metadata[titles]"), vec!["Faus"]);
        assert!(field(&form, "metadata[books]").is_empty());
    }

    #[tokio::test]
    async fn test_create_session_without_key() {
        let checkout =
            StripeCheckout::new(StripeConfig::unconfigured(), Storefront::default()).unwrap();
        let cart = Cart::from_value(serde_json::json!({
            "items": [{ "title": "Book A" }],
            "total": "5.00"
        }))
        .unwrap();

        let err = checkout.create_session(&cart).await.unwrap_err();
        assert!(matches!(err, RelayError::MisconfiguredCredential(_)));
        assert_eq!(err.to_string(), STRIPE_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_invalid_cart_wins_over_missing_key() {
        let checkout =
            StripeCheckout::new(StripeConfig::unconfigured(), Storefront::default()).unwrap();
        let cart = Cart::from_value(serde_json::json!({ "items": [], "total": 10 })).unwrap();

        let err = checkout.create_session(&cart).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        assert_eq!(err.status_code(), 400);
    }
}
