// src/lib.rs

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use services::provider::PaymentProvider;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn PaymentProvider>,
    /// Currency preferred when picking the balance snapshot (lowercase ISO code)
    pub primary_currency: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn PaymentProvider>, primary_currency: impl Into<String>) -> Self {
        Self {
            provider,
            primary_currency: primary_currency.into().to_lowercase(),
        }
    }
}

pub mod services {
    pub mod provider;
    pub mod stripe;
    pub mod analytics;
    pub mod currency_catalog;
    pub mod payment_status;
}

pub mod config;
pub mod models;
pub mod handlers;

/// Build the API router with every route mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/analytics", get(handlers::analytics::get_analytics))
        .route("/api/checkout", post(handlers::checkout::create_checkout))
        .route("/api/currencies", get(handlers::currencies::get_currencies))
        .route(
            "/api/payment-status",
            get(handlers::payment_status::get_payment_status),
        )
        .with_state(state)
}

/// Wrap the router with the HTTP layers the server runs with: a
/// `Content-Security-Policy` header on every response, permissive CORS and
/// request tracing.
pub fn with_http_layers(router: Router, content_security_policy: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            content_security_policy,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
