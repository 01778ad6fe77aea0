//! Payment handlers.
//!
//! ## Commands
//! - Creating payment intents through the payment provider
//! - Verifying and dispatching payment webhooks

mod create_payment_intent;
mod handle_payment_webhook;

pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
