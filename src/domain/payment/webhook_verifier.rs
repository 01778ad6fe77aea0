//! Stripe webhook signature verification.
//!
//! Implements verification of Stripe webhook signatures using HMAC-SHA256.
//! Includes timestamp validation to prevent replay attacks.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;
use super::webhook_event::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age for webhook events (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// All v1 signatures (HMAC-SHA256). Stripe sends several while a secret is rolled.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...][,v0=<legacy>]`
    ///
    /// Unknown keys are ignored. A v1 value that is not valid hex can never
    /// match and is dropped.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` if the timestamp or every v1
    /// signature is missing.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();
        let mut saw_v1 = false;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| WebhookError::MalformedHeader)?,
                    );
                }
                "v1" => {
                    saw_v1 = true;
                    if let Ok(bytes) = hex::decode(value.trim()) {
                        v1_signatures.push(bytes);
                    }
                }
                _ => {}
            }
        }

        match timestamp {
            Some(timestamp) if saw_v1 => Ok(Self {
                timestamp,
                v1_signatures,
            }),
            _ => Err(WebhookError::MalformedHeader),
        }
    }
}

/// Verifier for Stripe webhook signatures.
pub struct StripeWebhookVerifier {
    /// The webhook signing secret from the Stripe dashboard.
    secret: SecretString,
    /// Maximum event age in seconds.
    tolerance_secs: i64,
}

impl std::fmt::Debug for StripeWebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeWebhookVerifier")
            .field("secret", &"[REDACTED]")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

impl StripeWebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Overrides the maximum event age.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies the webhook signature and parses the event.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Compute expected signature using HMAC-SHA256
    /// 3. Compare against every v1 signature in constant time
    /// 4. Reject events older than the tolerance (future timestamps are accepted)
    /// 5. Parse the JSON payload into a `WebhookEvent`
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        self.verify_and_parse_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Same as [`verify_and_parse`](Self::verify_and_parse) with an explicit clock.
    pub fn verify_and_parse_at(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        let signature_header = signature_header
            .filter(|h| !h.trim().is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let header = SignatureHeader::parse(signature_header)?;

        let expected = self.compute_signature(header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        self.validate_timestamp(header.timestamp, now)?;

        WebhookEvent::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    /// Builds a `Stripe-Signature` header value for `payload` at `timestamp`.
    ///
    /// Useful for sending test events to a local endpoint.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
        let signature = self.compute_signature(timestamp, payload)?;
        Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
    }

    fn validate_timestamp(&self, timestamp: i64, now: i64) -> Result<(), WebhookError> {
        let age = now - timestamp;

        if age > self.tolerance_secs {
            tracing::warn!(
                event_timestamp = timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(WebhookError::TimestampOutOfRange);
        }

        Ok(())
    }

    /// HMAC-SHA256 over `<timestamp>.<payload>`.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
