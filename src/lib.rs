//! Payment Relay - Stripe payment intent and webhook relay
//!
//! This crate serves a checkout page, creates Stripe payment intents on
//! behalf of the browser and verifies Stripe webhook deliveries.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
