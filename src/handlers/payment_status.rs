//! Payment Status Handler
//!
//! GET /api/payment-status, called by the return page after the browser
//! confirms a payment.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

use crate::models::error::FailureResponse;
use crate::models::payment_status::{PaymentDetails, PaymentStatusQuery, PaymentStatusResponse};
use crate::models::transaction::TransactionStatus;
use crate::services::payment_status::{describe_status, intent_id_from_client_secret};
use crate::AppState;

const NO_PAYMENT_INFO: &str = "No payment information found";

/// Resolve a client secret to its intent and describe the outcome
///
/// # Query Parameters
///
/// - `payment_intent_client_secret` - secret appended to the return URL
///
/// # Errors
///
/// - 400 when the secret is missing or malformed
/// - 404 when the intent's secret does not match
/// - 500 when the provider call fails
pub async fn get_payment_status(
    State(state): State<AppState>,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<Json<PaymentStatusResponse>, (StatusCode, Json<FailureResponse>)> {
    let client_secret = query
        .payment_intent_client_secret
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            warn!("Payment status requested without client secret");
            (
                StatusCode::BAD_REQUEST,
                Json(FailureResponse::new(NO_PAYMENT_INFO)),
            )
        })?;

    let intent_id = intent_id_from_client_secret(client_secret).ok_or_else(|| {
        warn!("Malformed client secret");
        (
            StatusCode::BAD_REQUEST,
            Json(FailureResponse::new(NO_PAYMENT_INFO)),
        )
    })?;

    let intent = state
        .provider
        .retrieve_payment_intent(intent_id)
        .await
        .map_err(|e| {
            error!(intent_id, error = %e, "Failed to retrieve payment intent");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new(e.to_string())),
            )
        })?;

    if intent.client_secret.as_deref() != Some(client_secret) {
        warn!(intent_id, "Client secret does not match payment intent");
        return Err((
            StatusCode::NOT_FOUND,
            Json(FailureResponse::new("Payment not found")),
        ));
    }

    let (outcome, message) = describe_status(TransactionStatus::from(intent.status.as_str()));

    info!(
        intent_id = %intent.id,
        status = %intent.status,
        outcome = ?outcome,
        "Payment status resolved"
    );

    Ok(Json(PaymentStatusResponse {
        success: true,
        outcome,
        message: message.to_string(),
        payment: PaymentDetails {
            id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
            payment_method_types: intent.payment_method_types,
        },
    }))
}
