//! Analytics aggregation and history shaping
//!
//! Pure functions over an already fetched window of records. The summary is
//! always built from the full window; search, sort and pagination only shape
//! the list shown in the history table.

use std::cmp::Ordering;

use crate::models::analytics::{
    AnalyticsSummary, BalanceSnapshot, PaginationInfo, SearchField, SortField, SortOrder,
};
use crate::models::transaction::{TransactionRecord, TransactionStatus};
use crate::services::provider::{Balance, BalanceAmount};

/// Trailing window of intents fetched for the dashboard
pub const WINDOW_DAYS: i64 = 30;

/// Hard cap on fetched intents, one provider page
pub const WINDOW_LIMIT: u32 = 100;

/// Unix timestamp `WINDOW_DAYS` before `now`
pub fn window_start(now: i64) -> i64 {
    now - WINDOW_DAYS * 24 * 60 * 60
}

/// Single pass over the window.
pub fn summarize(records: &[TransactionRecord]) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary::default();

    for record in records {
        summary.total += 1;

        if record.status_kind() == TransactionStatus::Succeeded {
            summary.total_amount += record.amount;

            let method = summary
                .by_payment_method
                .entry(record.payment_method.clone())
                .or_default();
            method.count += 1;
            method.amount += record.amount;
        }

        *summary
            .by_status
            .entry(record.status.clone())
            .or_insert(0) += 1;
    }

    summary
}

/// Keep records whose `field` contains `value`, ignoring case.
///
/// An unknown field name matches nothing.
pub fn filter_records(
    records: Vec<TransactionRecord>,
    field: &str,
    value: &str,
) -> Vec<TransactionRecord> {
    let Ok(field) = field.parse::<SearchField>() else {
        tracing::debug!(field, "Unknown search field, no records match");
        return Vec::new();
    };

    let needle = value.to_lowercase();
    records
        .into_iter()
        .filter(|record| field.extract(record).to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort; equal keys keep fetch order in both directions.
pub fn sort_records(records: &mut [TransactionRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &TransactionRecord, b: &TransactionRecord, field: SortField) -> Ordering {
    match field {
        SortField::Created => a.created.cmp(&b.created),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Status => a.status.cmp(&b.status),
    }
}

/// Slice out `page` (1-based) of size `limit`.
///
/// Out-of-range pages give an empty slice.
pub fn paginate(
    records: &[TransactionRecord],
    page: u32,
    limit: u32,
) -> (Vec<TransactionRecord>, PaginationInfo) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_items = records.len() as u64;
    let total_pages = total_items.div_ceil(limit as u64);

    let start = (page as u64 - 1).saturating_mul(limit as u64);
    let items = if start >= total_items {
        Vec::new()
    } else {
        let start = start as usize;
        let end = (start + limit as usize).min(records.len());
        records[start..end].to_vec()
    };

    let pagination = PaginationInfo {
        page,
        limit,
        total_items,
        total_pages,
        has_next_page: (page as u64) < total_pages,
        has_previous_page: page > 1,
    };

    (items, pagination)
}

/// Pick the primary-currency bucket, else the first one.
fn pick<'a>(amounts: &'a [BalanceAmount], primary_currency: &str) -> Option<&'a BalanceAmount> {
    amounts
        .iter()
        .find(|b| b.currency == primary_currency)
        .or_else(|| amounts.first())
}

/// Available and pending are chosen independently; missing buckets count as 0.
pub fn balance_snapshot(balance: &Balance, primary_currency: &str) -> BalanceSnapshot {
    let available = pick(&balance.available, primary_currency);
    let pending = pick(&balance.pending, primary_currency);

    BalanceSnapshot {
        available: available.map(|b| b.amount).unwrap_or(0),
        pending: pending.map(|b| b.amount).unwrap_or(0),
        currency: available
            .map(|b| b.currency.clone())
            .unwrap_or_else(|| primary_currency.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, amount: i64, status: TransactionStatus, created: i64) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            amount,
            currency: "eur".to_string(),
            status: status.as_str().to_string(),
            payment_method: "card".to_string(),
            created,
            description: String::new(),
        }
    }

    fn example_window() -> Vec<TransactionRecord> {
        vec![
            record("a", 500, TransactionStatus::Succeeded, 100),
            record("b", 300, TransactionStatus::Canceled, 200),
            record("c", 700, TransactionStatus::Succeeded, 300),
        ]
    }

    fn ids(records: &[TransactionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_summarize_example_window() {
        let summary = summarize(&example_window());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.total_amount, 1200);
        assert_eq!(summary.by_status.get("succeeded"), Some(&2));
        assert_eq!(summary.by_status.get("canceled"), Some(&1));
        assert_eq!(summary.by_status.values().sum::<u64>(), summary.total);

        let card = summary.by_payment_method.get("card").unwrap();
        assert_eq!(card.count, 2);
        assert_eq!(card.amount, 1200);
    }

    #[test]
    fn test_summarize_methods_only_count_succeeded() {
        let mut failed = record("x", 900, TransactionStatus::RequiresPaymentMethod, 1);
        failed.payment_method = "paypal".to_string();
        let mut ok = record("y", 100, TransactionStatus::Succeeded, 2);
        ok.payment_method = "revolut_pay".to_string();

        let summary = summarize(&[failed, ok]);

        assert!(!summary.by_payment_method.contains_key("paypal"));
        assert_eq!(summary.by_payment_method["revolut_pay"].amount, 100);
        assert_eq!(summary.by_status["requires_payment_method"], 1);
        assert_eq!(summary.total_amount, 100);
    }

    #[test]
    fn test_summarize_groups_unlisted_status_verbatim() {
        let mut held = record("h", 400, TransactionStatus::Other, 1);
        held.status = "requires_capture".to_string();

        let summary = summarize(&[held]);

        assert_eq!(summary.by_status.get("requires_capture"), Some(&1));
        assert!(!summary.by_status.contains_key("other"));
        assert_eq!(summary.total_amount, 0);
    }

    #[test]
    fn test_summarize_empty_window() {
        let summary = summarize(&[]);
        assert_eq!(summary, AnalyticsSummary::default());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut records = example_window();
        records[1].id = "pi_ABC".to_string();

        let filtered = filter_records(records, "id", "abc");
        assert_eq!(ids(&filtered), vec!["pi_ABC"]);
    }

    #[test]
    fn test_filter_by_amount_uses_stringified_value() {
        let filtered = filter_records(example_window(), "amount", "00");
        assert_eq!(filtered.len(), 3);

        let filtered = filter_records(example_window(), "amount", "70");
        assert_eq!(ids(&filtered), vec!["c"]);
    }

    #[test]
    fn test_filter_by_status_and_method() {
        let filtered = filter_records(example_window(), "status", "SUCC");
        assert_eq!(ids(&filtered), vec!["a", "c"]);

        let filtered = filter_records(example_window(), "paymentMethod", "card");
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_filter_matches_raw_status() {
        let mut records = example_window();
        records[1].status = "requires_capture".to_string();

        let filtered = filter_records(records, "status", "capture");
        assert_eq!(ids(&filtered), vec!["b"]);
    }

    #[test]
    fn test_filter_unknown_field_is_empty() {
        assert!(filter_records(example_window(), "customer", "a").is_empty());
    }

    #[test]
    fn test_sort_amount_desc() {
        let mut records = example_window();
        sort_records(&mut records, SortField::Amount, SortOrder::Desc);
        assert_eq!(ids(&records), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_created_toggle_reverses() {
        let mut records = vec![
            record("late", 1, TransactionStatus::Succeeded, 300),
            record("early", 1, TransactionStatus::Succeeded, 100),
            record("mid", 1, TransactionStatus::Succeeded, 200),
        ];

        sort_records(&mut records, SortField::Created, SortOrder::Asc);
        assert!(records.windows(2).all(|w| w[0].created <= w[1].created));
        let ascending = ids(&records).join(",");

        sort_records(&mut records, SortField::Created, SortOrder::Desc);
        let mut descending: Vec<&str> = ids(&records);
        descending.reverse();
        assert_eq!(descending.join(","), ascending);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut records = vec![
            record("first", 100, TransactionStatus::Succeeded, 1),
            record("second", 100, TransactionStatus::Succeeded, 2),
            record("small", 50, TransactionStatus::Succeeded, 3),
            record("third", 100, TransactionStatus::Succeeded, 4),
        ];

        sort_records(&mut records, SortField::Amount, SortOrder::Asc);
        assert_eq!(ids(&records), vec!["small", "first", "second", "third"]);

        sort_records(&mut records, SortField::Amount, SortOrder::Desc);
        assert_eq!(ids(&records), vec!["first", "second", "third", "small"]);
    }

    #[test]
    fn test_sort_status_lexicographic() {
        let mut records = vec![
            record("p", 1, TransactionStatus::Processing, 1),
            record("c", 1, TransactionStatus::Canceled, 2),
            record("s", 1, TransactionStatus::Succeeded, 3),
            record("r", 1, TransactionStatus::RequiresAction, 4),
        ];

        sort_records(&mut records, SortField::Status, SortOrder::Asc);
        assert_eq!(ids(&records), vec!["c", "p", "r", "s"]);
    }

    #[test]
    fn test_paginate_example() {
        let mut records = example_window();
        sort_records(&mut records, SortField::Amount, SortOrder::Desc);

        let (items, pagination) = paginate(&records, 1, 2);
        assert_eq!(ids(&items), vec!["c", "a"]);
        assert_eq!(pagination.total_items, 3);
        assert_eq!(pagination.total_pages, 2);
        assert!(pagination.has_next_page);
        assert!(!pagination.has_previous_page);
    }

    #[test]
    fn test_pages_concatenate_to_full_list() {
        let records: Vec<TransactionRecord> = (0..11)
            .map(|i| record(&format!("pi_{}", i), i, TransactionStatus::Succeeded, i))
            .collect();
        let limit = 4;

        let (_, first) = paginate(&records, 1, limit);
        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages as u32 {
            let (items, pagination) = paginate(&records, page, limit);
            assert!(items.len() <= limit as usize);
            assert_eq!(
                pagination.has_next_page,
                (page as u64) * (limit as u64) < pagination.total_items
            );
            rebuilt.extend(items);
        }

        assert_eq!(rebuilt, records);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let (items, pagination) = paginate(&example_window(), 5, 2);
        assert!(items.is_empty());
        assert_eq!(pagination.page, 5);
        assert!(!pagination.has_next_page);
        assert!(pagination.has_previous_page);
    }

    #[test]
    fn test_paginate_empty_list() {
        let (items, pagination) = paginate(&[], 1, 6);
        assert!(items.is_empty());
        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_next_page);
        assert!(!pagination.has_previous_page);
    }

    #[test]
    fn test_balance_prefers_primary_currency() {
        let balance = Balance {
            available: vec![
                BalanceAmount { amount: 10, currency: "usd".to_string() },
                BalanceAmount { amount: 20, currency: "eur".to_string() },
            ],
            pending: vec![BalanceAmount { amount: 5, currency: "usd".to_string() }],
        };

        let snapshot = balance_snapshot(&balance, "eur");
        assert_eq!(snapshot.available, 20);
        assert_eq!(snapshot.pending, 5);
        assert_eq!(snapshot.currency, "eur");
    }

    #[test]
    fn test_balance_empty_defaults() {
        let snapshot = balance_snapshot(&Balance::default(), "eur");
        assert_eq!(snapshot.available, 0);
        assert_eq!(snapshot.pending, 0);
        assert_eq!(snapshot.currency, "eur");
    }

    #[test]
    fn test_window_start_is_thirty_days_back() {
        assert_eq!(window_start(3_000_000), 3_000_000 - 2_592_000);
    }
}
