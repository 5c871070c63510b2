use serde::{Deserialize, Serialize};

use crate::services::provider::PaymentIntent;

/// Payment-method tag used when the provider reports none
pub const UNKNOWN_PAYMENT_METHOD: &str = "unknown";

/// Lifecycle status of a payment intent, as far as the dashboard cares.
///
/// Statuses it does not distinguish (`requires_capture`,
/// `requires_confirmation`, ...) classify as `Other`. Records keep the raw
/// provider string for display, grouping and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Succeeded,
    Processing,
    RequiresPaymentMethod,
    RequiresAction,
    Canceled,
    Other,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Succeeded => "succeeded",
            TransactionStatus::Processing => "processing",
            TransactionStatus::RequiresPaymentMethod => "requires_payment_method",
            TransactionStatus::RequiresAction => "requires_action",
            TransactionStatus::Canceled => "canceled",
            TransactionStatus::Other => "other",
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(status: &str) -> Self {
        match status {
            "succeeded" => TransactionStatus::Succeeded,
            "processing" => TransactionStatus::Processing,
            "requires_payment_method" => TransactionStatus::RequiresPaymentMethod,
            "requires_action" => TransactionStatus::RequiresAction,
            "canceled" => TransactionStatus::Canceled,
            _ => TransactionStatus::Other,
        }
    }
}

/// One row of the payment history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    /// Minor currency units
    pub amount: i64,
    pub currency: String,
    /// Provider status, verbatim
    pub status: String,
    pub payment_method: String,
    /// Unix seconds
    pub created: i64,
    pub description: String,
}

impl TransactionRecord {
    pub fn status_kind(&self) -> TransactionStatus {
        TransactionStatus::from(self.status.as_str())
    }
}

impl From<PaymentIntent> for TransactionRecord {
    fn from(intent: PaymentIntent) -> Self {
        let payment_method = intent
            .payment_method_types
            .into_iter()
            .next()
            .unwrap_or_else(|| UNKNOWN_PAYMENT_METHOD.to_string());

        Self {
            id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
            payment_method,
            created: intent.created,
            description: intent.description.unwrap_or_default(),
        }
    }
}
