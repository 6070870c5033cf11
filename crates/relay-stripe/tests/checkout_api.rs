//! Mock-based tests for the Checkout Session builder.
//!
//! wiremock stands in for the Stripe API; captured form bodies are decoded
//! with serde_urlencoded and checked field by field.

use relay_core::{Cart, RelayError, Storefront};
use relay_stripe::{StripeCheckout, StripeConfig};
use serde_json::json;
use wiremock::{
    matchers::{header, header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn checkout_for(mock_server: &MockServer) -> StripeCheckout {
    StripeCheckout::new(
        StripeConfig::new("sk_test_abc123").with_api_base_url(mock_server.uri()),
        Storefront::default(),
    )
    .unwrap()
}

fn book_cart() -> Cart {
    Cart::from_value(json!({
        "items": [{ "title": "Book A" }, { "title": "Book B" }],
        "total": "19.99",
        "shipping": true
    }))
    .unwrap()
}

fn form_value(form: &[(String, String)], key: &str) -> Option<String> {
    form.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

#[tokio::test]
async fn test_create_session_posts_single_line_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header("authorization", "Bearer sk_test_abc123"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header_exists("idempotency-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_1",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let redirect = checkout_for(&mock_server)
        .create_session(&book_cart())
        .await
        .unwrap();

    assert_eq!(redirect.url, "https://checkout.stripe.com/c/pay/cs_test_1");
    assert_eq!(redirect.session_id.as_deref(), Some("cs_test_1"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let form: Vec<(String, String)> = serde_urlencoded::from_bytes(&requests[0].body).unwrap();
    assert_eq!(
        form_value(&form, "line_items[0][price_data][unit_amount]").as_deref(),
        Some("1999")
    );
    assert_eq!(
        form_value(&form, "line_items[0][price_data][product_data][description]").as_deref(),
        Some("Book A, Book B")
    );
    assert_eq!(form_value(&form, "metadata[books]").as_deref(), Some("Book A, Book B"));
    assert_eq!(form_value(&form, "mode").as_deref(), Some("payment"));
}

#[tokio::test]
async fn test_create_session_sends_pinned_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header("stripe-version", "2024-12-18.acacia"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "cs_2", "url": "https://pay/cs_2" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let checkout = StripeCheckout::new(
        StripeConfig::new("sk_test_abc123")
            .with_api_base_url(mock_server.uri())
            .with_api_version("2024-12-18.acacia"),
        Storefront::default(),
    )
    .unwrap();

    let redirect = checkout.create_session(&book_cart()).await.unwrap();
    assert_eq!(redirect.url, "https://pay/cs_2");
}

#[tokio::test]
async fn test_create_session_surfaces_stripe_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error": { "type": "card_error", "message": "card_declined" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = checkout_for(&mock_server)
        .create_session(&book_cart())
        .await
        .unwrap_err();

    match err {
        RelayError::UpstreamFailure {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "stripe");
            assert_eq!(status, 402);
            assert_eq!(message, "card_declined");
        }
        other => panic!("expected upstream failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_session_falls_back_on_unreadable_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let err = checkout_for(&mock_server)
        .create_session(&book_cart())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Stripe error");
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_invalid_cart_makes_no_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cart = Cart::from_value(json!({ "items": [], "total": 10 })).unwrap();
    let err = checkout_for(&mock_server)
        .create_session(&cart)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid cart data");
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_success_without_url_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cs_3" })))
        .mount(&mock_server)
        .await;

    let err = checkout_for(&mock_server)
        .create_session(&book_cart())
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Parse(_)));
}
