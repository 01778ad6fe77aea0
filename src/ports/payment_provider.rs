//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! The provider is a black box: validation, idempotency and fraud checks all
//! happen on its side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{PaymentIntent, PaymentIntentRequest};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for the given amount and currency.
    ///
    /// One outbound call, no retry.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError>;
}

/// Error category for transport failures.
pub const API_CONNECTION_ERROR: &str = "api_connection_error";

/// Error category for unexpected provider failures.
pub const API_ERROR: &str = "api_error";

/// Error category for malformed requests.
pub const INVALID_REQUEST_ERROR: &str = "invalid_request_error";

/// Errors from payment provider operations.
///
/// `error_type` and `code` are always populated so callers can relay them
/// without null checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    /// Human-readable message.
    pub message: String,

    /// Provider error category (e.g. "card_error", "invalid_request_error").
    pub error_type: String,

    /// Provider machine-readable code (e.g. "amount_too_small").
    pub code: String,

    /// Request parameter the error relates to, if any.
    pub param: Option<String>,

    /// HTTP status returned by the provider, if a response was received.
    pub status: Option<u16>,
}

impl ProviderError {
    /// Create a new provider error. A missing code falls back to the category.
    pub fn new(
        message: impl Into<String>,
        error_type: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        let error_type = error_type.into();
        let code = code
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| error_type.clone());
        Self {
            message: message.into(),
            error_type,
            code,
            param: None,
            status: None,
        }
    }

    /// Create with the request parameter at fault.
    pub fn with_param(mut self, param: Option<String>) -> Self {
        self.param = param;
        self
    }

    /// Create with the provider's HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, API_CONNECTION_ERROR, Some("network_error".to_string()))
    }

    /// Create an error for a provider call that did not finish in time.
    pub fn timeout(limit: std::time::Duration) -> Self {
        Self::new(
            format!("Request to the payment provider timed out after {}ms", limit.as_millis()),
            API_CONNECTION_ERROR,
            Some("timeout".to_string()),
        )
    }

    /// Create an error for a response body that could not be understood.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(message, API_ERROR, Some("invalid_response".to_string()))
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.error_type, self.code, self.message)
    }
}

impl std::error::Error for ProviderError {}
