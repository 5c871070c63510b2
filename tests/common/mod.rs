#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, http::StatusCode, Router};
use http_body_util::BodyExt;
use payment_demo_backend::{
    build_router,
    models::transaction::TransactionStatus,
    services::provider::{
        Balance, BalanceAmount, CountrySpec, CreatePaymentIntentParams, ListPaymentIntentsParams,
        PaymentIntent, PaymentProvider, ProviderError,
    },
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

/// In-memory payment provider
///
/// Serves canned balance, intents and country specs, or fails every call
/// when `fail` is set. Calls that carry parameters are recorded.
#[derive(Default)]
pub struct MockProvider {
    pub balance: Balance,
    pub intents: Vec<PaymentIntent>,
    pub country_specs: Vec<CountrySpec>,
    pub fail: bool,
    next_id: AtomicU64,
    pub list_calls: Mutex<Vec<ListPaymentIntentsParams>>,
    pub created: Mutex<Vec<CreatePaymentIntentParams>>,
}

impl MockProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_intents(intents: Vec<PaymentIntent>) -> Self {
        Self {
            intents,
            balance: balance(&[("eur", 125_000)], &[("eur", 4_000)]),
            ..Default::default()
        }
    }

    pub fn with_country_specs(country_specs: Vec<CountrySpec>) -> Self {
        Self {
            country_specs,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), ProviderError> {
        if self.fail {
            return Err(ProviderError::Api {
                status: 503,
                message: "Upstream unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn retrieve_balance(&self) -> Result<Balance, ProviderError> {
        self.check()?;
        Ok(self.balance.clone())
    }

    async fn list_payment_intents(
        &self,
        params: ListPaymentIntentsParams,
    ) -> Result<Vec<PaymentIntent>, ProviderError> {
        self.list_calls.lock().unwrap().push(params);
        self.check()?;
        Ok(self
            .intents
            .iter()
            .take(params.limit as usize)
            .cloned()
            .collect())
    }

    async fn create_payment_intent(
        &self,
        params: CreatePaymentIntentParams,
    ) -> Result<PaymentIntent, ProviderError> {
        self.created.lock().unwrap().push(params.clone());
        self.check()?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("pi_mock_{}", n);
        Ok(PaymentIntent {
            client_secret: Some(format!("{}_secret_{}", id, n)),
            id,
            amount: params
                .amount
                .and_then(|amount| amount.parse().ok())
                .unwrap_or_default(),
            currency: params.currency.unwrap_or_default(),
            status: TransactionStatus::RequiresPaymentMethod.as_str().to_string(),
            payment_method_types: vec!["card".to_string()],
            created: 1_700_000_000,
            description: None,
        })
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, ProviderError> {
        self.check()?;
        self.intents
            .iter()
            .find(|intent| intent.id == id)
            .cloned()
            .ok_or_else(|| ProviderError::Api {
                status: 404,
                message: format!("No such payment_intent: '{}'", id),
            })
    }

    async fn list_country_specs(&self, limit: u32) -> Result<Vec<CountrySpec>, ProviderError> {
        self.check()?;
        Ok(self
            .country_specs
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub fn balance(available: &[(&str, i64)], pending: &[(&str, i64)]) -> Balance {
    fn to_amounts(entries: &[(&str, i64)]) -> Vec<BalanceAmount> {
        entries
            .iter()
            .map(|(currency, amount)| BalanceAmount {
                amount: *amount,
                currency: currency.to_string(),
            })
            .collect()
    }

    Balance {
        available: to_amounts(available),
        pending: to_amounts(pending),
    }
}

pub fn intent(
    id: &str,
    amount: i64,
    status: TransactionStatus,
    created: i64,
    method: Option<&str>,
) -> PaymentIntent {
    PaymentIntent {
        id: id.to_string(),
        amount,
        currency: "eur".to_string(),
        status: status.as_str().to_string(),
        payment_method_types: method.map(|m| vec![m.to_string()]).unwrap_or_default(),
        created,
        description: None,
        client_secret: Some(format!("{}_secret_test", id)),
    }
}

pub fn country_spec(id: &str, currencies: &[&str]) -> CountrySpec {
    CountrySpec {
        id: id.to_string(),
        supported_payment_currencies: currencies.iter().map(|c| c.to_string()).collect(),
    }
}

/// Router over `provider`, returned with a handle for inspecting recorded calls
pub fn test_app(provider: MockProvider) -> (Router, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::new(provider.clone(), "eur");
    (build_router(state), provider)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
