//! Stripe API objects as they arrive over the wire.
//!
//! These mirror Stripe's JSON closely and are converted to domain types by
//! the adapter. Fields we never read are left out; serde ignores them.

use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentIntent;
use crate::ports::{ProviderError, API_ERROR};

/// Stripe PaymentIntent object (subset).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Unique identifier (pi_...).
    pub id: String,

    /// Secret for client-side confirmation. Null when fetched with a publishable key.
    pub client_secret: Option<String>,

    /// Amount in the smallest currency unit.
    pub amount: i64,

    /// Three-letter ISO currency code, lowercase.
    pub currency: String,

    /// Intent status (requires_payment_method, succeeded, ...).
    pub status: String,
}

impl StripePaymentIntent {
    /// Converts to the domain type. An intent without a client secret is useless to callers.
    pub fn into_domain(self) -> Result<PaymentIntent, ProviderError> {
        let client_secret = self
            .client_secret
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ProviderError::invalid_response(format!(
                    "Payment intent {} returned without a client secret",
                    self.id
                ))
            })?;

        Ok(PaymentIntent {
            id: self.id,
            client_secret,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
        })
    }
}

/// Error envelope Stripe returns with every non-2xx response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Stripe error object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeApiError {
    /// Error category (api_error, card_error, invalid_request_error, ...).
    #[serde(rename = "type")]
    pub error_type: Option<String>,

    /// Machine-readable code, absent for some categories.
    pub code: Option<String>,

    /// Human-readable message.
    pub message: Option<String>,

    /// Parameter the error relates to.
    pub param: Option<String>,

    /// Card issuer's decline reason for card errors.
    pub decline_code: Option<String>,

    /// Link to Stripe's documentation for this code.
    pub doc_url: Option<String>,
}

impl StripeApiError {
    pub fn into_provider_error(self, status: u16) -> ProviderError {
        let error_type = self.error_type.unwrap_or_else(|| API_ERROR.to_string());
        let message = self
            .message
            .unwrap_or_else(|| format!("Stripe returned HTTP {} without a message", status));

        ProviderError::new(message, error_type, self.code)
            .with_param(self.param)
            .with_status(status)
    }
}

/// Builds a `ProviderError` from a non-2xx response body.
pub fn provider_error_from_body(status: u16, body: &[u8]) -> ProviderError {
    match serde_json::from_slice::<StripeErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.into_provider_error(status),
        Err(_) => ProviderError::invalid_response(format!(
            "Stripe returned HTTP {}: {}",
            status,
            String::from_utf8_lossy(body)
        ))
        .with_status(status),
    }
}
