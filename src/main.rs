use std::sync::Arc;

use axum::http::HeaderValue;
use payment_demo_backend::{
    build_router, config::Config, services::stripe::StripeClient, with_http_layers, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payment_demo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    tracing::info!(
        stripe_api_base = %config.stripe_api_base,
        stripe_api_version = %config.stripe_api_version,
        primary_currency = %config.primary_currency,
        "Configuration loaded"
    );

    let stripe = StripeClient::new(
        config.stripe_secret_key.clone(),
        config.stripe_api_base.clone(),
        config.stripe_api_version.clone(),
        config.stripe_timeout,
    )
    .expect("Failed to build Stripe client");

    let state = AppState::new(Arc::new(stripe), config.primary_currency.clone());

    let csp = HeaderValue::from_str(&config.content_security_policy())
        .expect("FRAME_ANCESTORS is not a valid header value");

    // Build router
    let app = with_http_layers(build_router(state), csp);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .expect("Failed to bind listener");

    tracing::info!(
        "Server listening on {}",
        listener.local_addr().expect("Listener has no local address")
    );

    axum::serve(listener, app).await.expect("Server error");
}
