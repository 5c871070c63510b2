//! Payment provider seam
//!
//! Handlers talk to the upstream payment API only through [`PaymentProvider`].
//! The production implementation is [`crate::services::stripe::StripeClient`];
//! tests plug in an in-memory double.

use async_trait::async_trait;
use serde::Deserialize;

/// Errors raised while talking to the payment provider.
///
/// The `Display` text is what callers see in the failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status and (usually) an error envelope
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

/// One currency bucket of the account balance, amount in minor units
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BalanceAmount {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub available: Vec<BalanceAmount>,
    #[serde(default)]
    pub pending: Vec<BalanceAmount>,
}

/// Payment intent as returned by the provider (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    /// Raw provider status, see [`crate::models::transaction::TransactionStatus`]
    pub status: String,
    #[serde(default)]
    pub payment_method_types: Vec<String>,
    pub created: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountrySpec {
    pub id: String,
    #[serde(default)]
    pub supported_payment_currencies: Vec<String>,
}

/// Parameters for listing payment intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPaymentIntentsParams {
    /// Page size, the provider caps this at 100
    pub limit: u32,
    /// Only intents created at or after this Unix timestamp
    pub created_gte: Option<i64>,
}

/// Parameters for creating a payment intent.
///
/// Fields are optional form values so that malformed checkout requests are
/// forwarded as-is and rejected by the provider's own validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePaymentIntentParams {
    /// Minor units, as sent by the client (`1000` and `"1000"` are both accepted upstream)
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub country: Option<String>,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn retrieve_balance(&self) -> Result<Balance, ProviderError>;

    /// Reads the first page only; no cursor pagination is followed.
    async fn list_payment_intents(
        &self,
        params: ListPaymentIntentsParams,
    ) -> Result<Vec<PaymentIntent>, ProviderError>;

    /// Creates an intent with automatic payment-method selection enabled.
    async fn create_payment_intent(
        &self,
        params: CreatePaymentIntentParams,
    ) -> Result<PaymentIntent, ProviderError>;

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, ProviderError>;

    async fn list_country_specs(&self, limit: u32) -> Result<Vec<CountrySpec>, ProviderError>;
}
