//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `PaymentProvider` - Creates payment intents with the payment processor

mod payment_provider;

pub use payment_provider::{
    PaymentProvider, ProviderError, API_CONNECTION_ERROR, API_ERROR, INVALID_REQUEST_ERROR,
};
