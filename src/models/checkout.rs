use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::provider::CreatePaymentIntentParams;

/// Body of POST /api/checkout
///
/// Every field is optional and untyped: whatever the browser sends is
/// forwarded to the provider as a form value, and the provider does its own
/// validation. `{"amount": "1000"}` is therefore as good as `{"amount": 1000}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Minor currency units
    pub amount: Option<Value>,
    pub currency: Option<Value>,
    /// ISO country code, attached to the intent as metadata
    pub country: Option<Value>,
}

impl CheckoutRequest {
    pub fn into_params(self) -> CreatePaymentIntentParams {
        CreatePaymentIntentParams {
            amount: self.amount.and_then(form_value),
            currency: self.currency.and_then(form_value),
            country: self.country.and_then(form_value),
        }
    }
}

/// Form encoding of a JSON value; strings go out unquoted, `null` is dropped.
fn form_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub client_secret: Option<String>,
}
