//! Analytics request/response models
//!
//! Models for the GET /api/analytics endpoint that feeds the dashboard and
//! the payment history table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::models::transaction::TransactionRecord;

/// Default page size of the payment history table
pub const DEFAULT_PAGE_LIMIT: u32 = 6;

/// Query parameters for the analytics endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// 1-based page number (default: 1)
    pub page: Option<u32>,
    /// Page size (default: 6)
    pub limit: Option<u32>,
    /// `created`, `amount` or `status`
    pub sort_by: Option<String>,
    /// `asc` or `desc`, only used together with `sort_by`
    pub sort_order: Option<String>,
    /// Record field to search in (`id`, `amount`, `status`, `paymentMethod`, ...)
    pub search_field: Option<String>,
    /// Case-insensitive substring to look for
    pub search_value: Option<String>,
}

impl AnalyticsQuery {
    /// Page number, never below 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, never below 1
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1)
    }

    /// Sort key and direction; `None` unless both parse.
    pub fn sort(&self) -> Option<(SortField, SortOrder)> {
        let field = self.sort_by.as_deref()?.parse().ok()?;
        let order = self.sort_order.as_deref()?.parse().ok()?;
        Some((field, order))
    }

    /// Search field name and value; `None` unless both are given and the value is non-empty.
    ///
    /// The field stays a raw string: an unknown name is a valid search that
    /// matches nothing.
    pub fn search(&self) -> Option<(&str, &str)> {
        let field = self.search_field.as_deref()?;
        let value = self.search_value.as_deref()?;
        if value.is_empty() {
            return None;
        }
        Some((field, value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Created,
    Amount,
    Status,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(SortField::Created),
            "amount" => Ok(SortField::Amount),
            "status" => Ok(SortField::Status),
            other => Err(format!("unsupported sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unsupported sort order: {}", other)),
        }
    }
}

/// Closed set of record fields the history table can be searched by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Amount,
    Currency,
    Status,
    PaymentMethod,
    Created,
    Description,
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SearchField::Id),
            "amount" => Ok(SearchField::Amount),
            "currency" => Ok(SearchField::Currency),
            "status" => Ok(SearchField::Status),
            "paymentMethod" => Ok(SearchField::PaymentMethod),
            "created" => Ok(SearchField::Created),
            "description" => Ok(SearchField::Description),
            other => Err(format!("unknown search field: {}", other)),
        }
    }
}

impl SearchField {
    /// Stringified value of this field on `record`
    pub fn extract(&self, record: &TransactionRecord) -> String {
        match self {
            SearchField::Id => record.id.clone(),
            SearchField::Amount => record.amount.to_string(),
            SearchField::Currency => record.currency.clone(),
            SearchField::Status => record.status.clone(),
            SearchField::PaymentMethod => record.payment_method.clone(),
            SearchField::Created => record.created.to_string(),
            SearchField::Description => record.description.clone(),
        }
    }
}

/// Succeeded count and volume for one payment method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotals {
    pub count: u64,
    pub amount: i64,
}

/// Aggregates over the whole fetched window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Number of records, any status
    pub total: u64,
    /// Sum of succeeded amounts, minor units
    pub total_amount: i64,
    /// Succeeded records only
    pub by_payment_method: BTreeMap<String, MethodTotals>,
    /// All records
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub available: i64,
    pub pending: i64,
    pub currency: String,
}

/// Response for GET /api/analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: AnalyticsSummary,
    pub payment_history: Vec<TransactionRecord>,
    pub pagination: PaginationInfo,
    pub balance: BalanceSnapshot,
    pub currency: String,
}
