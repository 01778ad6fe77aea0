//! CreatePaymentIntentHandler - Command handler for creating payment intents.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::payment::PaymentIntentRequest;
use crate::ports::{PaymentProvider, ProviderError};

/// Command to create a payment intent.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub request: PaymentIntentRequest,
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentIntentResult {
    pub payment_intent_id: String,
    pub client_secret: String,
}

/// Handler for creating payment intents.
///
/// Forwards the request to the payment provider as-is. Nothing is cached, so
/// identical commands produce independent intents.
pub struct CreatePaymentIntentHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    timeout: Option<Duration>,
}

impl CreatePaymentIntentHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self {
            payment_provider,
            timeout: None,
        }
    }

    /// Bounds the provider call. An elapsed call fails with a `timeout` provider error.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, ProviderError> {
        let call = self.payment_provider.create_payment_intent(&cmd.request);
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(ProviderError::timeout(limit))),
            None => call.await,
        };

        match outcome {
            Ok(intent) => {
                tracing::info!(
                    payment_intent_id = %intent.id,
                    amount = intent.amount,
                    currency = %intent.currency,
                    "Payment intent created"
                );
                Ok(CreatePaymentIntentResult {
                    payment_intent_id: intent.id,
                    client_secret: intent.client_secret,
                })
            }
            Err(err) => {
                tracing::error!(
                    amount = ?cmd.request.amount,
                    currency = ?cmd.request.currency,
                    error_type = %err.error_type,
                    code = %err.code,
                    error = %err.message,
                    "Error creating payment intent"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::payment::PaymentIntent;
    use async_trait::async_trait;

    struct SlowProvider;

    #[async_trait]
    impl PaymentProvider for SlowProvider {
        async fn create_payment_intent(
            &self,
            _request: &PaymentIntentRequest,
        ) -> Result<PaymentIntent, ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(ProviderError::network("unreachable"))
        }
    }

    fn command() -> CreatePaymentIntentCommand {
        CreatePaymentIntentCommand {
            request: PaymentIntentRequest::new(1000, "usd"),
        }
    }

    #[tokio::test]
    async fn returns_client_secret_from_provider() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreatePaymentIntentHandler::new(provider.clone());

        let result = handler.handle(command()).await.unwrap();

        assert!(!result.client_secret.is_empty());
        assert!(result.client_secret.starts_with(&result.payment_intent_id));
        assert_eq!(provider.calls(), vec![PaymentIntentRequest::new(1000, "usd")]);
    }

    #[tokio::test]
    async fn identical_commands_are_not_deduplicated() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreatePaymentIntentHandler::new(provider.clone());

        let first = handler.handle(command()).await.unwrap();
        let second = handler.handle(command()).await.unwrap();

        assert_ne!(first.client_secret, second.client_secret);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn provider_error_is_returned_unchanged() {
        let error = ProviderError::new(
            "Invalid currency: xyz",
            "invalid_request_error",
            Some("parameter_invalid".to_string()),
        );
        let handler =
            CreatePaymentIntentHandler::new(Arc::new(MockPaymentProvider::failing(error.clone())));

        let result = handler.handle(command()).await;

        assert_eq!(result.unwrap_err(), error);
    }

    #[tokio::test]
    async fn slow_provider_fails_with_timeout_error() {
        let handler = CreatePaymentIntentHandler::new(Arc::new(SlowProvider))
            .with_timeout(Some(Duration::from_millis(50)));

        let err = handler.handle(command()).await.unwrap_err();

        assert_eq!(err.error_type, "api_connection_error");
        assert_eq!(err.code, "timeout");
    }

    #[tokio::test]
    async fn fast_provider_is_unaffected_by_timeout() {
        let handler = CreatePaymentIntentHandler::new(Arc::new(MockPaymentProvider::new()))
            .with_timeout(Some(Duration::from_secs(5)));

        assert!(handler.handle(command()).await.is_ok());
    }
}
