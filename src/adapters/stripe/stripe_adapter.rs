//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::payment::{PaymentIntent, PaymentIntentRequest};
use crate::ports::{PaymentProvider, ProviderError};

use super::api_types::{provider_error_from_body, StripePaymentIntent};

/// Default Stripe API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Build from the application's payment configuration.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self::new(config.stripe_api_key.clone()).with_base_url(config.api_base_url.clone())
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url());

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&request.form_params())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Stripe create_payment_intent request failed");
                ProviderError::network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        if !status.is_success() {
            let err = provider_error_from_body(status.as_u16(), &body);
            tracing::warn!(
                status = status.as_u16(),
                error_type = %err.error_type,
                code = %err.code,
                "Stripe rejected create_payment_intent"
            );
            return Err(err);
        }

        let stripe_intent: StripePaymentIntent = serde_json::from_slice(&body).map_err(|e| {
            ProviderError::invalid_response(format!("Failed to parse Stripe response: {}", e))
                .with_status(status.as_u16())
        })?;

        let intent = stripe_intent.into_domain()?;
        tracing::debug!(
            payment_intent_id = %intent.id,
            status = %intent.status,
            "Created payment intent"
        );
        Ok(intent)
    }
}
