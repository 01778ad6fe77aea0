//! Stripe webhook event types.
//!
//! Only the envelope fields are captured. The affected object stays opaque
//! JSON because nothing downstream acts on it beyond logging.

use serde::Serialize;
use serde_json::Value;

/// Event kinds the receiver distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    /// `payment_intent.succeeded`
    PaymentIntentSucceeded,
    /// `payment_intent.payment_failed`
    PaymentIntentPaymentFailed,
    /// Any other event type, kept verbatim.
    Unknown(String),
}

impl WebhookEventKind {
    /// Maps a Stripe event type string to a kind.
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => Self::PaymentIntentPaymentFailed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the Stripe event type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PaymentIntentSucceeded => "payment_intent.succeeded",
            Self::PaymentIntentPaymentFailed => "payment_intent.payment_failed",
            Self::Unknown(s) => s,
        }
    }
}

impl std::fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified webhook event envelope.
///
/// Built leniently from any JSON document: envelope fields that are absent or
/// of an unexpected shape take their defaults, so a verified event is always
/// acknowledged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g. "payment_intent.succeeded"). Empty when absent or null;
    /// non-string values keep their JSON text.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Whether this is a live or test mode event.
    pub livemode: bool,

    /// Event payload containing the affected object.
    pub data: WebhookEventData,
}

/// Event data container.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookEventData {
    /// The object affected by this event.
    pub object: Value,
}

impl WebhookEvent {
    /// Parses a raw payload. Only bytes that are not JSON are rejected.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(payload)?;
        Ok(Self::from_value(&value))
    }

    /// Reads the envelope fields out of a JSON document.
    pub fn from_value(value: &Value) -> Self {
        let event_type = match value.get("type") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Self {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            event_type,
            created: value.get("created").and_then(Value::as_i64).unwrap_or_default(),
            livemode: value.get("livemode").and_then(Value::as_bool).unwrap_or_default(),
            data: WebhookEventData {
                object: value
                    .get("data")
                    .and_then(|data| data.get("object"))
                    .cloned()
                    .unwrap_or(Value::Null),
            },
        }
    }

    pub fn kind(&self) -> WebhookEventKind {
        WebhookEventKind::from_type(&self.event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_variants() {
        assert_eq!(
            WebhookEventKind::from_type("payment_intent.succeeded"),
            WebhookEventKind::PaymentIntentSucceeded
        );
        assert_eq!(
            WebhookEventKind::from_type("payment_intent.payment_failed"),
            WebhookEventKind::PaymentIntentPaymentFailed
        );
    }

    #[test]
    fn other_types_are_unknown() {
        let kind = WebhookEventKind::from_type("charge.refunded");

        assert_eq!(kind, WebhookEventKind::Unknown("charge.refunded".to_string()));
        assert_eq!(kind.to_string(), "charge.refunded");
    }

    #[test]
    fn kind_round_trips_through_as_str() {
        for kind in [
            WebhookEventKind::PaymentIntentSucceeded,
            WebhookEventKind::PaymentIntentPaymentFailed,
        ] {
            assert_eq!(WebhookEventKind::from_type(kind.as_str()), kind);
        }
    }

    #[test]
    fn parses_stripe_envelope() {
        let payload = r#"{
            "id": "evt_123",
            "object": "event",
            "type": "payment_intent.succeeded",
            "created": 1704067200,
            "livemode": false,
            "api_version": "2024-06-20",
            "pending_webhooks": 1,
            "data": {
                "object": {"id": "pi_123", "object": "payment_intent", "amount": 1000}
            }
        }"#;

        let event = WebhookEvent::from_slice(payload.as_bytes()).unwrap();

        assert_eq!(event.id, "evt_123");
        assert_eq!(event.kind(), WebhookEventKind::PaymentIntentSucceeded);
        assert_eq!(event.data.object["amount"], 1000);
        assert!(!event.livemode);
    }

    #[test]
    fn missing_or_null_type_is_unknown() {
        for payload in [r#"{"id":"evt_1"}"#, r#"{"type":null}"#, "[]", "42"] {
            let event = WebhookEvent::from_slice(payload.as_bytes()).unwrap();

            assert_eq!(event.kind(), WebhookEventKind::Unknown(String::new()), "{payload}");
        }
    }

    #[test]
    fn non_string_type_keeps_json_text() {
        let event = WebhookEvent::from_slice(br#"{"type":{"a":1},"livemode":"yes"}"#).unwrap();

        assert_eq!(event.kind(), WebhookEventKind::Unknown(r#"{"a":1}"#.to_string()));
        assert!(!event.livemode);
    }

    #[test]
    fn invalid_json_fails_to_parse() {
        assert!(WebhookEvent::from_slice(b"not json").is_err());
    }
}
