//! Webhook error types for Stripe webhook verification.
//!
//! Messages follow the wording Stripe's own libraries use so the text echoed
//! back in `Webhook Error: <message>` reads the same to operators.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while verifying a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `stripe-signature` header was absent or empty.
    #[error("No stripe-signature header value was provided.")]
    MissingSignature,

    /// The header could not be split into a timestamp and v1 signatures.
    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    /// None of the v1 signatures matched the expected HMAC.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// Timestamp is older than the tolerance or too far in the future.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Signature matched but the body is not a Stripe event.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl WebhookError {
    /// Every verification failure is a client error; Stripe will not retry a 4xx.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signature_displays_correctly() {
        assert_eq!(
            WebhookError::MissingSignature.to_string(),
            "No stripe-signature header value was provided."
        );
    }

    #[test]
    fn invalid_signature_displays_correctly() {
        assert_eq!(
            WebhookError::InvalidSignature.to_string(),
            "No signatures found matching the expected signature for payload"
        );
    }

    #[test]
    fn invalid_payload_displays_message() {
        let err = WebhookError::InvalidPayload("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid payload: expected value at line 1 column 1"
        );
    }

    #[test]
    fn all_errors_return_bad_request() {
        let errors = [
            WebhookError::MissingSignature,
            WebhookError::MalformedHeader,
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::InvalidPayload("x".to_string()),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
