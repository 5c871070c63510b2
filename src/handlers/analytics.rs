//! Analytics Handler
//!
//! GET /api/analytics endpoint backing the dashboard and payment history.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{error, info};

use crate::models::analytics::{AnalyticsQuery, AnalyticsResponse};
use crate::models::error::FailureResponse;
use crate::models::transaction::TransactionRecord;
use crate::services::analytics::{
    balance_snapshot, filter_records, paginate, sort_records, summarize, window_start,
    WINDOW_LIMIT,
};
use crate::services::provider::ListPaymentIntentsParams;
use crate::AppState;

/// Get dashboard analytics and a page of payment history
///
/// GET /api/analytics
///
/// Aggregates are computed over every intent of the last 30 days (at most
/// 100); search, sort and pagination only apply to `paymentHistory`.
///
/// # Query Parameters
///
/// - `page` - 1-based page (default: 1)
/// - `limit` - Page size (default: 6)
/// - `sortBy` - `created`, `amount` or `status`
/// - `sortOrder` - `asc` or `desc`, ignored without `sortBy`
/// - `searchField` - Field to search (`id`, `amount`, `status`, `paymentMethod`, ...)
/// - `searchValue` - Case-insensitive substring
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "analytics": {
///     "total": 3,
///     "totalAmount": 1200,
///     "byPaymentMethod": { "card": { "count": 2, "amount": 1200 } },
///     "byStatus": { "canceled": 1, "succeeded": 2 }
///   },
///   "paymentHistory": [
///     {
///       "id": "pi_3N...",
///       "amount": 700,
///       "currency": "eur",
///       "status": "succeeded",
///       "paymentMethod": "card",
///       "created": 1705347200,
///       "description": ""
///     }
///   ],
///   "pagination": {
///     "page": 1,
///     "limit": 6,
///     "totalItems": 3,
///     "totalPages": 1,
///     "hasNextPage": false,
///     "hasPreviousPage": false
///   },
///   "balance": { "available": 125000, "pending": 4000, "currency": "eur" },
///   "currency": "eur"
/// }
/// ```
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, (StatusCode, Json<FailureResponse>)> {
    info!(
        page = query.page,
        limit = query.limit,
        sort_by = query.sort_by,
        sort_order = query.sort_order,
        search_field = query.search_field,
        "Analytics request received"
    );

    let params = ListPaymentIntentsParams {
        limit: WINDOW_LIMIT,
        created_gte: Some(window_start(Utc::now().timestamp())),
    };

    // Independent upstream calls, both must succeed
    let (balance, intents) = tokio::try_join!(
        state.provider.retrieve_balance(),
        state.provider.list_payment_intents(params),
    )
    .map_err(|e| {
        error!(error = %e, "Analytics fetch failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FailureResponse::new(e.to_string())),
        )
    })?;

    let records: Vec<TransactionRecord> = intents.into_iter().map(TransactionRecord::from).collect();
    let analytics = summarize(&records);

    let mut history = match query.search() {
        Some((field, value)) => filter_records(records, field, value),
        None => records,
    };

    if let Some((field, order)) = query.sort() {
        sort_records(&mut history, field, order);
    }

    let (payment_history, pagination) = paginate(&history, query.page(), query.limit());

    let balance = balance_snapshot(&balance, &state.primary_currency);
    let currency = balance.currency.clone();

    info!(
        total = analytics.total,
        total_amount = analytics.total_amount,
        matched = pagination.total_items,
        returned = payment_history.len(),
        "Analytics returned"
    );

    Ok(Json(AnalyticsResponse {
        success: true,
        analytics,
        payment_history,
        pagination,
        balance,
        currency,
    }))
}
