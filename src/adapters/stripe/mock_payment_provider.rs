//! Mock payment provider for testing.
//!
//! Provides an in-memory implementation of `PaymentProvider` for unit and
//! integration tests. Supports:
//! - Fresh, Stripe-shaped client secrets per call
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::payment::{PaymentIntent, PaymentIntentRequest};
use crate::ports::{PaymentProvider, ProviderError};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Inject errors
/// mock.set_error(ProviderError::network("connection reset"));
///
/// let result = mock.create_payment_intent(&request).await;
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Error returned by every call while set.
    error: Option<ProviderError>,

    /// Requests received, in order.
    calls: Vec<PaymentIntentRequest>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        let mock = Self::new();
        mock.set_error(error);
        mock
    }

    pub fn set_error(&self, error: ProviderError) {
        self.lock().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<PaymentIntentRequest> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError> {
        let mut state = self.lock();
        state.calls.push(request.clone());

        if let Some(error) = &state.error {
            return Err(error.clone());
        }

        let id = format!("pi_{}", uuid::Uuid::new_v4().simple());
        let client_secret = format!("{}_secret_{}", id, uuid::Uuid::new_v4().simple());

        Ok(PaymentIntent {
            id,
            client_secret,
            amount: echoed_amount(request.amount.as_ref()),
            currency: request
                .currency
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            status: "requires_payment_method".to_string(),
        })
    }
}

/// Amount echoed back the way Stripe coerces it: integers and integer strings.
fn echoed_amount(amount: Option<&Value>) -> i64 {
    amount
        .and_then(|v| v.as_i64().or_else(|| v.as_str()?.parse().ok()))
        .unwrap_or_default()
}
