//! Payment intent value types.
//!
//! A `PaymentIntentRequest` is built from the inbound request body and handed
//! to the payment provider unchanged. Amount and currency are not validated
//! here; the provider owns those rules and reports violations itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Amount and currency for a new payment intent.
///
/// Both fields hold whatever JSON value the client sent. An omitted field is
/// not forwarded, leaving the provider to report the missing parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in the smallest currency unit (e.g. cents for USD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,

    /// Three-letter ISO currency code (e.g. "usd").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
}

impl PaymentIntentRequest {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(Value::from(amount)),
            currency: Some(Value::String(currency.into())),
        }
    }

    /// Form parameters for the provider call, skipping absent fields.
    ///
    /// Scalars are rendered as text. Arrays and objects use bracket keys
    /// (`amount[0]`, `amount[value]`).
    pub fn form_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(amount) = &self.amount {
            push_form_value("amount".to_string(), amount, &mut params);
        }
        if let Some(currency) = &self.currency {
            push_form_value("currency".to_string(), currency, &mut params);
        }
        params
    }
}

fn push_form_value(key: String, value: &Value, params: &mut Vec<(String, String)>) {
    match value {
        Value::Null => params.push((key, String::new())),
        Value::Bool(b) => params.push((key, b.to_string())),
        Value::Number(n) => params.push((key, n.to_string())),
        Value::String(s) => params.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_form_value(format!("{key}[{i}]"), item, params);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                push_form_value(format!("{key}[{name}]"), item, params);
            }
        }
    }
}

/// Payment intent as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's payment intent ID (pi_...).
    pub id: String,

    /// Secret handed to client-side code to complete the payment.
    pub client_secret: String,

    /// Amount in the smallest currency unit.
    pub amount: i64,

    /// Currency code as echoed by the provider.
    pub currency: String,

    /// Provider status (e.g. "requires_payment_method").
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(params: &[(&str, &str)]) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn form_params_include_both_fields() {
        let request = PaymentIntentRequest::new(1000, "usd");

        assert_eq!(
            request.form_params(),
            pairs(&[("amount", "1000"), ("currency", "usd")])
        );
    }

    #[test]
    fn form_params_skip_missing_fields() {
        let request = PaymentIntentRequest {
            amount: None,
            currency: Some(json!("eur")),
        };

        assert_eq!(request.form_params(), pairs(&[("currency", "eur")]));
        assert!(PaymentIntentRequest::default().form_params().is_empty());
    }

    #[test]
    fn negative_amount_is_forwarded_unchanged() {
        let request = PaymentIntentRequest::new(-5, "usd");

        assert_eq!(request.form_params()[0], ("amount".to_string(), "-5".to_string()));
    }

    #[test]
    fn non_integer_values_are_rendered_as_text() {
        let request = PaymentIntentRequest {
            amount: Some(json!("1000")),
            currency: Some(json!(5)),
        };
        assert_eq!(
            request.form_params(),
            pairs(&[("amount", "1000"), ("currency", "5")])
        );

        let fractional = PaymentIntentRequest {
            amount: Some(json!(10.5)),
            currency: Some(json!(true)),
        };
        assert_eq!(
            fractional.form_params(),
            pairs(&[("amount", "10.5"), ("currency", "true")])
        );
    }

    #[test]
    fn nested_values_use_bracket_keys() {
        let request = PaymentIntentRequest {
            amount: Some(json!([1, 2])),
            currency: Some(json!({"code": "usd"})),
        };

        assert_eq!(
            request.form_params(),
            pairs(&[("amount[0]", "1"), ("amount[1]", "2"), ("currency[code]", "usd")])
        );
    }

    #[test]
    fn deserializes_partial_body() {
        let request: PaymentIntentRequest = serde_json::from_str(r#"{"amount": 250}"#).unwrap();

        assert_eq!(request.amount, Some(json!(250)));
        assert!(request.currency.is_none());
    }
}
