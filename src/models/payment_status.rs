//! Payment status models
//!
//! Models for GET /api/payment-status, which the return page calls after the
//! browser confirms a payment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentStatusQuery {
    /// Client secret the provider appends to the return URL
    pub payment_intent_client_secret: Option<String>,
}

/// How the return page should present a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Success,
    Pending,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    /// Provider status, verbatim
    pub status: String,
    pub payment_method_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub success: bool,
    pub outcome: PaymentOutcome,
    pub message: String,
    pub payment: PaymentDetails,
}
