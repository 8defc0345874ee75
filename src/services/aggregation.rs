//! Pure aggregation over a user's transaction set. No I/O: callers fetch the
//! relevant rows and pass them in together with `now`, so results are a
//! function of (transaction set, window, now) only.
//!
//! Calendar days are midnight-to-midnight in UTC throughout.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::models::Transaction;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_revenue: BigDecimal,
    pub total_transactions: i64,
    pub completed_transactions: i64,
    pub pending_transactions: i64,
    pub failed_transactions: i64,
    pub last_30_days_revenue: BigDecimal,
}

#[derive(Debug, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub revenue: BigDecimal,
    pub transactions: i64,
}

#[derive(Debug, Serialize)]
pub struct RevenueBreakdown {
    pub total_revenue: BigDecimal,
    pub transaction_count: i64,
    pub by_type: BTreeMap<String, i64>,
}

fn completed_sum<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> BigDecimal {
    transactions
        .filter(|t| t.status == "completed")
        .fold(BigDecimal::from(0), |acc, t| acc + &t.amount)
}

/// Summary statistics over the given transactions. Revenue counts only
/// `completed` transactions; `refunded` exists as a status but is not tallied
/// separately. Empty input yields all zeros.
pub fn summarize(transactions: &[Transaction], now: DateTime<Utc>) -> DashboardSummary {
    let window_start = now - Duration::days(30);
    let count_by_status =
        |status: &str| transactions.iter().filter(|t| t.status == status).count() as i64;

    DashboardSummary {
        total_revenue: completed_sum(transactions.iter()),
        total_transactions: transactions.len() as i64,
        completed_transactions: count_by_status("completed"),
        pending_transactions: count_by_status("pending"),
        failed_transactions: count_by_status("failed"),
        last_30_days_revenue: completed_sum(
            transactions.iter().filter(|t| t.created_at >= window_start),
        ),
    }
}

/// Per-day revenue and volume for the trailing 7 calendar days. Always
/// returns exactly 7 entries, ordered today-first (i = 0 is `now`'s day,
/// counting backward). Day boundaries are [UTC midnight, next UTC midnight).
pub fn daily_stats(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<DailyStat> {
    (0..7)
        .map(|i| {
            let date = (now - Duration::days(i)).date_naive();
            let day_start = date.and_time(NaiveTime::MIN).and_utc();
            let day_end = day_start + Duration::days(1);

            let in_day: Vec<&Transaction> = transactions
                .iter()
                .filter(|t| t.created_at >= day_start && t.created_at < day_end)
                .collect();

            DailyStat {
                date,
                revenue: completed_sum(in_day.iter().copied()),
                transactions: in_day.len() as i64,
            }
        })
        .collect()
}

/// Totals used by revenue report generation: completed revenue, overall
/// count, and a per-kind count of all matching transactions.
pub fn revenue_breakdown(transactions: &[Transaction]) -> RevenueBreakdown {
    let mut by_type = BTreeMap::new();
    for tx in transactions {
        *by_type.entry(tx.kind.clone()).or_insert(0i64) += 1;
    }

    RevenueBreakdown {
        total_revenue: completed_sum(transactions.iter()),
        transaction_count: transactions.len() as i64,
        by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn tx(amount: &str, kind: &str, status: &str, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            external_id: Uuid::new_v4().to_string(),
            amount: BigDecimal::from_str(amount).unwrap(),
            currency: "USD".to_string(),
            kind: kind.to_string(),
            status: status.to_string(),
            payment_method: "card".to_string(),
            description: String::new(),
            created_at,
            updated_at: created_at,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        "2024-03-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn summarize_empty_set_yields_zeros() {
        let summary = summarize(&[], fixed_now());

        assert_eq!(summary.total_revenue, BigDecimal::from(0));
        assert_eq!(summary.total_transactions, 0);
        assert_eq!(summary.completed_transactions, 0);
        assert_eq!(summary.pending_transactions, 0);
        assert_eq!(summary.failed_transactions, 0);
        assert_eq!(summary.last_30_days_revenue, BigDecimal::from(0));
    }

    #[test]
    fn summarize_counts_by_status() {
        let now = fixed_now();
        let transactions = vec![
            tx("100.00", "purchase", "completed", now),
            tx("50.00", "purchase", "pending", now),
            tx("25.00", "transfer", "failed", now),
            tx("10.00", "refund", "refunded", now),
        ];

        let summary = summarize(&transactions, now);

        assert_eq!(summary.total_revenue, BigDecimal::from_str("100.00").unwrap());
        assert_eq!(summary.total_transactions, 4);
        assert_eq!(summary.completed_transactions, 1);
        assert_eq!(summary.pending_transactions, 1);
        assert_eq!(summary.failed_transactions, 1);
        // Refunded is not tallied separately; the per-status counts may sum
        // below the total.
        assert!(
            summary.completed_transactions
                + summary.pending_transactions
                + summary.failed_transactions
                <= summary.total_transactions
        );
    }

    #[test]
    fn summarize_thirty_day_window_boundary() {
        let now = fixed_now();
        let transactions = vec![
            tx("100.00", "purchase", "completed", now - Duration::days(29)),
            tx("40.00", "purchase", "completed", now - Duration::days(31)),
        ];

        let summary = summarize(&transactions, now);

        assert_eq!(summary.total_revenue, BigDecimal::from_str("140.00").unwrap());
        assert_eq!(summary.last_30_days_revenue, BigDecimal::from_str("100.00").unwrap());
    }

    #[test]
    fn summarize_ignores_non_completed_revenue() {
        let now = fixed_now();
        let transactions = vec![
            tx("50.00", "purchase", "pending", now),
            tx("25.00", "purchase", "failed", now),
            tx("10.00", "refund", "refunded", now),
        ];

        let summary = summarize(&transactions, now);

        assert_eq!(summary.total_revenue, BigDecimal::from(0));
        assert_eq!(summary.last_30_days_revenue, BigDecimal::from(0));
        assert_eq!(summary.total_transactions, 3);
    }

    #[test]
    fn daily_stats_always_returns_seven_entries() {
        let now = fixed_now();

        assert_eq!(daily_stats(&[], now).len(), 7);

        let transactions = vec![tx("100.00", "purchase", "completed", now)];
        assert_eq!(daily_stats(&transactions, now).len(), 7);
    }

    #[test]
    fn daily_stats_ordered_today_first() {
        let now = fixed_now();
        let stats = daily_stats(&[], now);

        assert_eq!(stats[0].date, now.date_naive());
        for i in 1..7 {
            assert_eq!(stats[i].date, now.date_naive() - Duration::days(i as i64));
        }
    }

    #[test]
    fn daily_stats_buckets_by_utc_day() {
        let now = fixed_now();
        let transactions = vec![
            tx("100.00", "purchase", "completed", now),
            tx("50.00", "purchase", "pending", now),
            tx("30.00", "purchase", "completed", now - Duration::days(2)),
        ];

        let stats = daily_stats(&transactions, now);

        assert_eq!(stats[0].revenue, BigDecimal::from_str("100.00").unwrap());
        assert_eq!(stats[0].transactions, 2);
        assert_eq!(stats[1].revenue, BigDecimal::from(0));
        assert_eq!(stats[1].transactions, 0);
        assert_eq!(stats[2].revenue, BigDecimal::from_str("30.00").unwrap());
        assert_eq!(stats[2].transactions, 1);
    }

    #[test]
    fn daily_stats_day_boundary_is_exclusive_at_midnight() {
        let now = fixed_now();
        // 2024-03-15T00:00:00Z belongs to day 0; one second earlier to day 1.
        let at_midnight: DateTime<Utc> = "2024-03-15T00:00:00Z".parse().unwrap();
        let before_midnight: DateTime<Utc> = "2024-03-14T23:59:59Z".parse().unwrap();

        let transactions = vec![
            tx("10.00", "purchase", "completed", at_midnight),
            tx("20.00", "purchase", "completed", before_midnight),
        ];

        let stats = daily_stats(&transactions, now);

        assert_eq!(stats[0].revenue, BigDecimal::from_str("10.00").unwrap());
        assert_eq!(stats[1].revenue, BigDecimal::from_str("20.00").unwrap());
    }

    #[test]
    fn daily_stats_counts_match_summary_within_window() {
        let now = fixed_now();
        let transactions = vec![
            tx("100.00", "purchase", "completed", now),
            tx("50.00", "purchase", "pending", now - Duration::days(1)),
            tx("25.00", "transfer", "failed", now - Duration::days(6)),
        ];

        let stats = daily_stats(&transactions, now);
        let stats_count: i64 = stats.iter().map(|s| s.transactions).sum();

        let summary = summarize(&transactions, now);
        assert_eq!(stats_count, summary.total_transactions);
    }

    #[test]
    fn seven_day_filtered_example() {
        // Worked example: 100 completed + 50 pending on day 0, 30 completed
        // on day 10. The 7-day subset excludes the day-10 transaction.
        let now = fixed_now();
        let all = vec![
            tx("100", "purchase", "completed", now),
            tx("50", "purchase", "pending", now),
            tx("30", "purchase", "completed", now - Duration::days(10)),
        ];
        let window_start = now - Duration::days(7);
        let in_window: Vec<Transaction> = all
            .iter()
            .filter(|t| t.created_at >= window_start)
            .cloned()
            .collect();

        let summary = summarize(&in_window, now);
        assert_eq!(summary.total_revenue, BigDecimal::from(100));
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.completed_transactions, 1);
        assert_eq!(summary.pending_transactions, 1);

        let stats = daily_stats(&in_window, now);
        assert_eq!(stats[0].revenue, BigDecimal::from(100));
        assert_eq!(stats[0].transactions, 2);
    }

    #[test]
    fn revenue_breakdown_empty_set() {
        let breakdown = revenue_breakdown(&[]);

        assert_eq!(breakdown.total_revenue, BigDecimal::from(0));
        assert_eq!(breakdown.transaction_count, 0);
        assert!(breakdown.by_type.is_empty());
    }

    #[test]
    fn revenue_breakdown_counts_all_kinds() {
        let now = fixed_now();
        let transactions = vec![
            tx("100.00", "purchase", "completed", now),
            tx("20.00", "purchase", "pending", now),
            tx("15.00", "refund", "completed", now),
            tx("5.00", "transfer", "failed", now),
        ];

        let breakdown = revenue_breakdown(&transactions);

        assert_eq!(breakdown.total_revenue, BigDecimal::from_str("115.00").unwrap());
        assert_eq!(breakdown.transaction_count, 4);
        assert_eq!(breakdown.by_type.get("purchase"), Some(&2));
        assert_eq!(breakdown.by_type.get("refund"), Some(&1));
        assert_eq!(breakdown.by_type.get("transfer"), Some(&1));
    }

    #[test]
    fn revenue_breakdown_serializes_amounts_as_decimal_strings() {
        let now = fixed_now();
        let transactions = vec![tx("100.50", "purchase", "completed", now)];

        let value = serde_json::to_value(revenue_breakdown(&transactions)).unwrap();

        assert_eq!(value["total_revenue"], "100.50");
        assert_eq!(value["transaction_count"], 1);
        assert_eq!(value["by_type"]["purchase"], 1);
    }
}
