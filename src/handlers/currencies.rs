use axum::{extract::State, Json};

use crate::models::currency::CurrenciesResponse;
use crate::services::currency_catalog::{build_catalog, fallback_catalog, COUNTRY_SPEC_LIMIT};
use crate::AppState;

/// Handler for GET /api/currencies
///
/// Never fails: when the provider cannot be reached the fixed list of eight
/// popular currencies is served instead.
pub async fn get_currencies(State(state): State<AppState>) -> Json<CurrenciesResponse> {
    let currencies = match state.provider.list_country_specs(COUNTRY_SPEC_LIMIT).await {
        Ok(specs) => {
            let catalog = build_catalog(&specs);
            tracing::info!(
                countries = specs.len(),
                currencies = catalog.len(),
                "Currency catalog built"
            );
            catalog
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch country specs, serving fallback currencies");
            fallback_catalog()
        }
    };

    Json(CurrenciesResponse { currencies })
}
