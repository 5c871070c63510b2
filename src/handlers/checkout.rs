use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::models::checkout::{CheckoutRequest, CheckoutResponse};
use crate::models::error::FailureResponse;
use crate::AppState;

/// Handler for POST /api/checkout
///
/// Creates a fresh payment intent on every call and returns its client
/// secret for the browser's payment element. No idempotency key is sent, so
/// two identical submissions create two intents.
///
/// Bodies that are not a JSON object get the extractor's status with the
/// usual failure envelope.
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<FailureResponse>)> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(status = %rejection.status(), "Rejected checkout body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(FailureResponse::new(rejection.body_text())),
        )
    })?;

    tracing::info!(
        amount = ?req.amount,
        currency = ?req.currency,
        country = ?req.country,
        "Checkout request received"
    );

    let params = req.into_params();

    match state.provider.create_payment_intent(params).await {
        Ok(intent) => {
            tracing::info!(intent_id = %intent.id, "Checkout intent created");
            Ok(Json(CheckoutResponse {
                client_secret: intent.client_secret,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to create payment intent: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new(e.to_string())),
            ))
        }
    }
}
