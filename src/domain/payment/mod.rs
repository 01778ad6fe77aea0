//! Payment domain module.
//!
//! Request-scoped value types for payment intent creation and webhook intake.
//! Nothing here is persisted.
//!
//! # Module Structure
//!
//! - `intent` - Payment intent request and provider result
//! - `webhook_event` - Webhook envelope and the closed set of event kinds
//! - `webhook_verifier` - HMAC-SHA256 signature verification
//! - `webhook_errors` - Verification failures

mod intent;
mod webhook_errors;
mod webhook_event;
mod webhook_verifier;

pub use intent::{PaymentIntent, PaymentIntentRequest};
pub use webhook_errors::WebhookError;
pub use webhook_event::{WebhookEvent, WebhookEventData, WebhookEventKind};
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS};
