//! Payment relay HTTP server.
//!
//! # Usage
//!
//! ```bash
//! PAYMENT_RELAY__PAYMENT__STRIPE_API_KEY=sk_test_... \
//! PAYMENT_RELAY__PAYMENT__STRIPE_WEBHOOK_SECRET=whsec_... \
//! cargo run --release
//! ```
//!
//! See `.env.example` for every setting. `RUST_LOG` overrides the configured log level.

use std::sync::Arc;

use payment_relay::adapters::{build_app, PaymentAppState, StripeConfig, StripePaymentAdapter};
use payment_relay::config::AppConfig;
use payment_relay::domain::payment::StripeWebhookVerifier;
use payment_relay::telemetry::init_tracing;

const FALLBACK_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(FALLBACK_LOG_LEVEL, false);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.server.log_level, config.is_production());

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Server failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let payment = &config.payment;
    tracing::info!(
        environment = ?config.server.environment,
        test_mode = payment.is_test_mode(),
        live_mode = payment.is_live_mode(),
        api_base_url = %payment.api_base_url,
        "Loaded configuration"
    );

    let provider = StripePaymentAdapter::new(StripeConfig::from_payment_config(payment));
    let verifier = StripeWebhookVerifier::new(payment.stripe_webhook_secret.clone())
        .with_tolerance(payment.webhook_tolerance_secs);

    let state = PaymentAppState::new(Arc::new(provider), Arc::new(verifier));
    let app = build_app(state, &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Payment relay listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Payment relay shut down gracefully");
    Ok(())
}

/// Waits for Ctrl-C or SIGTERM (Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down..."),
                    _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                ctrl_c.await;
                tracing::info!("Received Ctrl-C, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        tracing::info!("Received Ctrl-C, shutting down...");
    }
}
