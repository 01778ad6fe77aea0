//! HTTP adapters - REST API implementations.
//!
//! `build_app` assembles the full service: payment endpoints, the health
//! check, the static checkout page and the tower-http middleware stack.

pub mod payment;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use payment::{payment_router, PaymentAppState};

/// Build the application router with all routes and middleware.
///
/// The payment routes bound their provider call with `request_timeout` and
/// report an elapsed call in the usual error body. The static page and health
/// check sit behind a plain request timeout (408).
pub fn build_app(state: PaymentAppState, config: &ServerConfig) -> Router {
    let index = config.static_dir.join("index.html");
    let state = state.with_request_timeout(config.request_timeout());

    let site: Router = Router::new()
        .route("/health", get(health))
        .route_service("/", ServeFile::new(index))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TimeoutLayer::new(config.request_timeout()));

    payment_router()
        .with_state(state)
        .merge(site)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(config)),
        )
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// CORS for the configured origins. With none configured, no origin is allowed.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::payment::StripeWebhookVerifier;

    fn state() -> PaymentAppState {
        PaymentAppState::new(
            Arc::new(MockPaymentProvider::new()),
            Arc::new(StripeWebhookVerifier::new(SecretString::new(
                "whsec_app_test".to_string(),
            ))),
        )
    }

    fn config_with_static(dir: &std::path::Path) -> ServerConfig {
        ServerConfig {
            static_dir: dir.to_path_buf(),
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn health_reports_ok_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(state(), &config_with_static(dir.path()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn root_serves_index_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Checkout</h1>").unwrap();
        let app = build_app(state(), &config_with_static(dir.path()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>Checkout</h1>");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(state(), &config_with_static(dir.path()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(state(), &config_with_static(dir.path()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn client_request_id_is_echoed() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(state(), &config_with_static(dir.path()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-123");
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            cors_origins: Some("https://shop.example.com".to_string()),
            ..config_with_static(dir.path())
        };
        let app = build_app(state(), &config);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://shop.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://shop.example.com"
        );
    }
}
