use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    /// Lowercase ISO code
    pub code: String,
    pub name: String,
    pub symbol: String,
}

/// Response for GET /api/currencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyEntry>,
}
