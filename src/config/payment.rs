//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// Stripe API host, overridable for local stubs
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum webhook event age in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Create a configuration with defaults for everything but the secrets.
    pub fn new(stripe_api_key: impl Into<String>, stripe_webhook_secret: impl Into<String>) -> Self {
        Self {
            stripe_api_key: SecretString::new(stripe_api_key.into()),
            stripe_webhook_secret: SecretString::new(stripe_webhook_secret.into()),
            api_base_url: default_api_base_url(),
            webhook_tolerance_secs: default_webhook_tolerance(),
        }
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        let key = self.stripe_api_key.expose_secret();
        key.starts_with("sk_test_") || key.starts_with("rk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        let key = self.stripe_api_key.expose_secret();
        key.starts_with("sk_live_") || key.starts_with("rk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let api_key = self.stripe_api_key.expose_secret();
        let webhook_secret = self.stripe_webhook_secret.expose_secret();

        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Secret or restricted keys only; a publishable key cannot create intents
        if !api_key.starts_with("sk_") && !api_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.webhook_tolerance_secs <= 0 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }

        if production {
            if !self.api_base_url.starts_with("https://") {
                return Err(ValidationError::ApiBaseUrlMustBeHttps);
            }
            if self.is_test_mode() {
                return Err(ValidationError::TestKeyInProduction);
            }
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_webhook_tolerance() -> i64 {
    300
}
