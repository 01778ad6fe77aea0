//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payment::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler,
};
use crate::domain::payment::{StripeWebhookVerifier, WebhookError};
use crate::ports::{PaymentProvider, ProviderError, INVALID_REQUEST_ERROR};

use super::dto::{
    ClientSecretResponse, CreatePaymentIntentRequest, PaymentErrorResponse, WebhookAckResponse,
};

/// Header Stripe signs webhook deliveries with.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; everything inside is immutable and Arc-wrapped.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub webhook_verifier: Arc<StripeWebhookVerifier>,
    /// Upper bound on the provider call, if any.
    pub request_timeout: Option<Duration>,
}

impl PaymentAppState {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        webhook_verifier: Arc<StripeWebhookVerifier>,
    ) -> Self {
        Self {
            payment_provider,
            webhook_verifier,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.payment_provider.clone())
            .with_timeout(self.request_timeout)
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.webhook_verifier.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /create-payment-intent - Create a payment intent and return its client secret
pub async fn create_payment_intent(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let request = CreatePaymentIntentRequest::from_body(content_type, &body)
        .map_err(PaymentApiError::InvalidBody)?;

    let handler = state.create_payment_intent_handler();
    let cmd = CreatePaymentIntentCommand {
        request: request.into(),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(ClientSecretResponse {
        client_secret: result.client_secret,
    }))
}

/// POST /webhook - Verify and acknowledge a Stripe webhook
///
/// Takes the raw body: the signature covers the exact bytes Stripe sent.
pub async fn handle_stripe_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    handler.handle(cmd).await?;

    Ok(Json(WebhookAckResponse::received()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error for the payment intent endpoint.
#[derive(Debug)]
pub enum PaymentApiError {
    /// The provider call failed.
    Provider(ProviderError),
    /// The request body was not usable JSON.
    InvalidBody(String),
}

impl From<ProviderError> for PaymentApiError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        match self {
            PaymentApiError::Provider(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PaymentErrorResponse::from(&err)),
            )
                .into_response(),
            PaymentApiError::InvalidBody(message) => {
                tracing::debug!(error = %message, "Rejected payment intent request body");
                let body = PaymentErrorResponse {
                    error: message,
                    error_type: INVALID_REQUEST_ERROR.to_string(),
                    code: "invalid_body".to_string(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

/// API error for the webhook endpoint. Rendered as plain text for Stripe's dashboard.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        (self.0.status_code(), format!("Webhook Error: {}", self.0)).into_response()
    }
}
