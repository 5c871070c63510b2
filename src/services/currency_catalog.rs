//! Supported currency catalog
//!
//! Derives the checkout currency list from the provider's country specs.

use std::collections::HashSet;

use crate::models::currency::CurrencyEntry;
use crate::services::provider::CountrySpec;

/// Country specs requested from the provider
pub const COUNTRY_SPEC_LIMIT: u32 = 100;

/// Listed first, in this order
pub const POPULAR_CURRENCIES: [&str; 8] = ["usd", "eur", "gbp", "jpy", "cad", "aud", "chf", "cny"];

/// code, symbol, name
const CURRENCY_INFO: [(&str, &str, &str); 20] = [
    ("usd", "$", "US Dollar"),
    ("eur", "€", "Euro"),
    ("gbp", "£", "British Pound"),
    ("jpy", "¥", "Japanese Yen"),
    ("cad", "C$", "Canadian Dollar"),
    ("aud", "A$", "Australian Dollar"),
    ("chf", "CHF", "Swiss Franc"),
    ("cny", "¥", "Chinese Yuan"),
    ("inr", "₹", "Indian Rupee"),
    ("sgd", "S$", "Singapore Dollar"),
    ("hkd", "HK$", "Hong Kong Dollar"),
    ("nzd", "NZ$", "New Zealand Dollar"),
    ("sek", "kr", "Swedish Krona"),
    ("nok", "kr", "Norwegian Krone"),
    ("dkk", "kr", "Danish Krone"),
    ("pln", "zł", "Polish Złoty"),
    ("mxn", "MX$", "Mexican Peso"),
    ("brl", "R$", "Brazilian Real"),
    ("krw", "₩", "South Korean Won"),
    ("zar", "R", "South African Rand"),
];

/// Display entry for `code`; unknown codes show the uppercased code as name and symbol.
pub fn describe(code: &str) -> CurrencyEntry {
    match CURRENCY_INFO.iter().find(|(c, _, _)| *c == code) {
        Some((_, symbol, name)) => CurrencyEntry {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        },
        None => CurrencyEntry {
            code: code.to_string(),
            name: code.to_uppercase(),
            symbol: code.to_uppercase(),
        },
    }
}

/// Union of every country's settlement currencies, popular ones first, the rest by code.
pub fn build_catalog(specs: &[CountrySpec]) -> Vec<CurrencyEntry> {
    let mut seen = HashSet::new();
    let mut codes: Vec<&str> = specs
        .iter()
        .flat_map(|spec| spec.supported_payment_currencies.iter())
        .map(String::as_str)
        .filter(|code| seen.insert(*code))
        .collect();

    codes.sort_by_key(|code| {
        let rank = POPULAR_CURRENCIES
            .iter()
            .position(|popular| popular == code)
            .unwrap_or(POPULAR_CURRENCIES.len());
        (rank, *code)
    });

    codes.into_iter().map(describe).collect()
}

/// Served when the provider cannot be reached
pub fn fallback_catalog() -> Vec<CurrencyEntry> {
    POPULAR_CURRENCIES.iter().map(|code| describe(code)).collect()
}
