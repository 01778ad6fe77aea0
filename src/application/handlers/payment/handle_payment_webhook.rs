//! HandlePaymentWebhookHandler - Command handler for processing payment provider webhooks.

use std::sync::Arc;

use crate::domain::payment::{StripeWebhookVerifier, WebhookError, WebhookEvent, WebhookEventKind};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// `stripe-signature` header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
///
/// Every variant is acknowledged to the provider. None of them triggers a
/// business action yet; they exist so callers and tests can see which branch ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// `payment_intent.succeeded` was logged.
    PaymentSucceeded { event_id: String },
    /// `payment_intent.payment_failed` was logged.
    PaymentFailed { event_id: String },
    /// Event type with no handler.
    Unhandled { event_id: String, event_type: String },
}

/// Handler for processing payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    verifier: Arc<StripeWebhookVerifier>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(verifier: Arc<StripeWebhookVerifier>) -> Self {
        Self { verifier }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, cmd.signature.as_deref())
            .map_err(|err| {
                tracing::warn!(error = %err, "Webhook verification failed");
                err
            })?;

        // 2. Dispatch on event type
        Ok(dispatch(event))
    }
}

fn dispatch(event: WebhookEvent) -> HandlePaymentWebhookResult {
    let kind = event.kind();
    tracing::debug!(event_id = %event.id, event_type = %kind, "Dispatching webhook event");

    match kind {
        WebhookEventKind::PaymentIntentSucceeded => {
            tracing::info!(
                event_id = %event.id,
                livemode = event.livemode,
                object = %event.data.object,
                "Payment succeeded"
            );
            HandlePaymentWebhookResult::PaymentSucceeded { event_id: event.id }
        }
        WebhookEventKind::PaymentIntentPaymentFailed => {
            tracing::warn!(
                event_id = %event.id,
                livemode = event.livemode,
                object = %event.data.object,
                "Payment failed"
            );
            HandlePaymentWebhookResult::PaymentFailed { event_id: event.id }
        }
        WebhookEventKind::Unknown(event_type) => {
            tracing::info!(event_id = %event.id, "Unhandled event type {}", event_type);
            HandlePaymentWebhookResult::Unhandled {
                event_id: event.id,
                event_type,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    const SECRET: &str = "whsec_handler_test";

    fn verifier() -> Arc<StripeWebhookVerifier> {
        Arc::new(StripeWebhookVerifier::new(SecretString::new(SECRET.to_string())))
    }

    fn signed_command(event_type: &str) -> HandlePaymentWebhookCommand {
        let payload = serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "created": 1704067200,
            "livemode": false,
            "data": {"object": {"id": "pi_1", "object": "payment_intent"}}
        })
        .to_string()
        .into_bytes();
        let signature = verifier()
            .sign(chrono::Utc::now().timestamp(), &payload)
            .unwrap();

        HandlePaymentWebhookCommand {
            payload,
            signature: Some(signature),
        }
    }

    #[tokio::test]
    async fn succeeded_event_is_dispatched() {
        let handler = HandlePaymentWebhookHandler::new(verifier());

        let result = handler
            .handle(signed_command("payment_intent.succeeded"))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandlePaymentWebhookResult::PaymentSucceeded {
                event_id: "evt_1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_event_is_dispatched() {
        let handler = HandlePaymentWebhookHandler::new(verifier());

        let result = handler
            .handle(signed_command("payment_intent.payment_failed"))
            .await
            .unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::PaymentFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_event_is_unhandled_not_error() {
        let handler = HandlePaymentWebhookHandler::new(verifier());

        let result = handler
            .handle(signed_command("customer.created"))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandlePaymentWebhookResult::Unhandled {
                event_id: "evt_1".to_string(),
                event_type: "customer.created".to_string()
            }
        );
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let handler = HandlePaymentWebhookHandler::new(verifier());
        let mut cmd = signed_command("payment_intent.succeeded");
        cmd.signature = None;

        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::MissingSignature)));
    }

    #[tokio::test]
    async fn tampered_payload_is_rejected() {
        let handler = HandlePaymentWebhookHandler::new(verifier());
        let mut cmd = signed_command("payment_intent.succeeded");
        cmd.payload = cmd
            .payload
            .iter()
            .map(|b| if *b == b'1' { b'2' } else { *b })
            .collect();

        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[tokio::test]
    async fn event_without_type_is_unhandled_not_error() {
        let handler = HandlePaymentWebhookHandler::new(verifier());
        let payload = br#"{"id":"evt_2","data":{"object":{}}}"#.to_vec();
        let signature = verifier()
            .sign(chrono::Utc::now().timestamp(), &payload)
            .unwrap();

        let result = handler
            .handle(HandlePaymentWebhookCommand {
                payload,
                signature: Some(signature),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            HandlePaymentWebhookResult::Unhandled {
                event_id: "evt_2".to_string(),
                event_type: String::new()
            }
        );
    }
}
