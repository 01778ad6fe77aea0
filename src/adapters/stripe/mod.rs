//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe's payment intents API.
//! Webhook signature verification lives in the domain
//! (`domain::payment::StripeWebhookVerifier`) since it needs no network access.
//!
//! # Configuration
//!
//! Required environment variables:
//! - `PAYMENT_RELAY__PAYMENT__STRIPE_API_KEY`: Stripe secret API key
//! - `PAYMENT_RELAY__PAYMENT__STRIPE_WEBHOOK_SECRET`: Webhook signing secret (whsec_...)

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use api_types::{StripeApiError, StripeErrorEnvelope, StripePaymentIntent};
pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, DEFAULT_API_BASE_URL};
