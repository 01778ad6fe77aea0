//! Data transfer objects for payment endpoints.
//!
//! Field names match what the browser-side Stripe integration already sends
//! and expects (`clientSecret`, `received`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payment::PaymentIntentRequest;
use crate::ports::ProviderError;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /create-payment-intent`.
///
/// Values are kept as sent; the provider decides whether they are acceptable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in the smallest currency unit.
    #[serde(default)]
    pub amount: Option<Value>,
    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<Value>,
}

impl CreatePaymentIntentRequest {
    /// Reads a request body.
    ///
    /// Bodies without a JSON content type, and empty bodies, yield an empty
    /// request. JSON objects contribute their `amount` and `currency`; arrays
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns a message when a JSON-typed body is not JSON, or is a bare
    /// scalar rather than an object or array.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, String> {
        if !content_type.is_some_and(is_json_content_type) {
            return Ok(Self::default());
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        match value {
            Value::Object(mut fields) => Ok(Self {
                amount: fields.remove("amount").filter(|v| !v.is_null()),
                currency: fields.remove("currency").filter(|v| !v.is_null()),
            }),
            Value::Array(_) => Ok(Self::default()),
            _ => Err("Request body must be a JSON object or array".to_string()),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

impl From<CreatePaymentIntentRequest> for PaymentIntentRequest {
    fn from(req: CreatePaymentIntentRequest) -> Self {
        PaymentIntentRequest {
            amount: req.amount,
            currency: req.currency,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a created payment intent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    pub client_secret: String,
}

/// Error body for payment intent failures.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error category.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Machine-readable code.
    pub code: String,
}

impl From<&ProviderError> for PaymentErrorResponse {
    fn from(err: &ProviderError) -> Self {
        Self {
            error: err.message.clone(),
            error_type: err.error_type.clone(),
            code: err.code.clone(),
        }
    }
}

/// Acknowledgement for a verified webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
}

impl WebhookAckResponse {
    pub fn received() -> Self {
        Self { received: true }
    }
}
