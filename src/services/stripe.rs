use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::services::provider::{
    Balance, CountrySpec, CreatePaymentIntentParams, ListPaymentIntentsParams, PaymentIntent,
    PaymentProvider, ProviderError,
};

/// Thin reqwest adapter over the Stripe REST API
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
    api_version: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl StripeClient {
    pub fn new(
        secret_key: String,
        base_url: String,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            secret_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(format!("{}{}", self.base_url, path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.secret_key)
            .header("Stripe-Version", &self.api_version)
            .header("accept", "application/json")
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

/// Turn a non-2xx body into an `Api` error, preferring the provider's own message.
fn api_error(status: u16, body: &str) -> ProviderError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error: ErrorBody { message: Some(message), .. } }) => message,
        Ok(ErrorEnvelope { error: ErrorBody { kind: Some(kind), .. } }) => {
            format!("Stripe API error {}: {}", status, kind)
        }
        _ => format!("Stripe API error {}: {}", status, body),
    };

    ProviderError::Api { status, message }
}

/// Form fields for `POST /v1/payment_intents`; absent inputs are left out.
fn create_intent_form(params: &CreatePaymentIntentParams) -> Vec<(&'static str, String)> {
    let mut form = Vec::with_capacity(4);

    if let Some(amount) = &params.amount {
        form.push(("amount", amount.clone()));
    }
    if let Some(currency) = &params.currency {
        form.push(("currency", currency.clone()));
    }
    form.push(("automatic_payment_methods[enabled]", "true".to_string()));
    if let Some(country) = &params.country {
        form.push(("metadata[country]", country.clone()));
    }

    form
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn retrieve_balance(&self) -> Result<Balance, ProviderError> {
        tracing::debug!("Retrieving balance from Stripe");

        let response = self.get("/v1/balance").send().await?;
        Self::read(response).await
    }

    async fn list_payment_intents(
        &self,
        params: ListPaymentIntentsParams,
    ) -> Result<Vec<PaymentIntent>, ProviderError> {
        tracing::info!(
            limit = params.limit,
            created_gte = ?params.created_gte,
            "Listing payment intents from Stripe"
        );

        let mut query = vec![("limit", params.limit.to_string())];
        if let Some(created_gte) = params.created_gte {
            query.push(("created[gte]", created_gte.to_string()));
        }

        let response = self.get("/v1/payment_intents").query(&query).send().await?;
        let list: ListResponse<PaymentIntent> = Self::read(response).await?;

        tracing::debug!(
            count = list.data.len(),
            has_more = list.has_more,
            "Fetched payment intents"
        );

        Ok(list.data)
    }

    async fn create_payment_intent(
        &self,
        params: CreatePaymentIntentParams,
    ) -> Result<PaymentIntent, ProviderError> {
        tracing::info!(
            amount = ?params.amount,
            currency = ?params.currency,
            country = ?params.country,
            "Creating payment intent"
        );

        let response = self
            .post("/v1/payment_intents")
            .form(&create_intent_form(&params))
            .send()
            .await?;
        let intent: PaymentIntent = Self::read(response).await?;

        tracing::info!(intent_id = %intent.id, "Payment intent created");

        Ok(intent)
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, ProviderError> {
        tracing::debug!(intent_id = %id, "Retrieving payment intent");

        let response = self.get(&format!("/v1/payment_intents/{}", id)).send().await?;
        Self::read(response).await
    }

    async fn list_country_specs(&self, limit: u32) -> Result<Vec<CountrySpec>, ProviderError> {
        tracing::info!(limit, "Listing country specs from Stripe");

        let response = self
            .get("/v1/country_specs")
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        let list: ListResponse<CountrySpec> = Self::read(response).await?;

        Ok(list.data)
    }
}
