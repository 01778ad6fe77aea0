//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Payment intents, webhook events and signature verification

pub mod payment;
