//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_payment_intent, handle_stripe_webhook, PaymentAppState};

/// Create the payment API router.
///
/// # Routes
///
/// - `POST /create-payment-intent` - Create a payment intent, returns `{clientSecret}`
/// - `POST /webhook` - Stripe webhooks (no auth, signature verified)
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/webhook", post(handle_stripe_webhook))
}
