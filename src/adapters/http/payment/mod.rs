//! HTTP adapter for payment endpoints.
//!
//! Exposes payment intent creation and the Stripe webhook receiver.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{PaymentApiError, PaymentAppState, WebhookApiError, STRIPE_SIGNATURE_HEADER};
pub use routes::payment_router;
