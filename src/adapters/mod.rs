//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes, DTOs and the application router
//! - `stripe` - Stripe API client and an in-memory provider for tests

pub mod http;
pub mod stripe;

pub use http::{build_app, PaymentAppState};
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
