//! Descriptive aggregations over the order table.
//!
//! Every function here is a pure function of an [`OrderTable`]; calling one
//! twice on the same table yields the same output.

use std::collections::{BTreeMap, HashMap};

use dashboard_core::models::{
    MonthlyRevenue, PaymentTypeCount, StateCount, StatusCount, YearMonth,
};
use dashboard_core::time_utils::whole_days_between;

use crate::table::OrderTable;

// ── OrderAggregator ───────────────────────────────────────────────────────────

/// Stateless helper grouping order rows into summary tables.
pub struct OrderAggregator;

impl OrderAggregator {
    /// Row counts per `customer_state`, largest first.
    ///
    /// Every row is counted, so the counts sum to `table.len()`. Equal counts
    /// keep the order in which the states first appear.
    pub fn customer_count_by_state(table: &OrderTable) -> Vec<StateCount> {
        count_descending(table.records().iter().map(|r| r.customer_state.as_str()))
            .into_iter()
            .map(|(state, customer_count)| StateCount {
                state,
                customer_count,
            })
            .collect()
    }

    /// Counts for exactly the statuses in `reference`, in that order.
    ///
    /// Statuses outside `reference` are dropped; listed statuses that never
    /// occur get a count of zero.
    pub fn order_status_distribution(table: &OrderTable, reference: &[&str]) -> Vec<StatusCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in table.records() {
            *counts.entry(record.order_status.as_str()).or_default() += 1;
        }

        reference
            .iter()
            .map(|status| StatusCount {
                status: status.to_string(),
                count: counts.get(status).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Mean of `delivered - purchased` in whole days over delivered rows.
    ///
    /// Returns `None` when no row has a delivery date.
    pub fn mean_shipping_time(table: &OrderTable) -> Option<f64> {
        let (total, count) = table
            .records()
            .iter()
            .filter_map(|r| {
                r.order_delivered_customer_date
                    .map(|delivered| whole_days_between(delivered, r.order_purchase_timestamp))
            })
            .fold((0i64, 0usize), |(total, count), days| (total + days, count + 1));

        if count == 0 {
            None
        } else {
            Some(total as f64 / count as f64)
        }
    }

    /// Price totals per purchase month, oldest month first.
    ///
    /// Missing prices are skipped; a month whose prices are all missing still
    /// appears with zero revenue.
    pub fn monthly_revenue(table: &OrderTable) -> Vec<MonthlyRevenue> {
        // BTreeMap keeps months in chronological order.
        let mut map: BTreeMap<YearMonth, f64> = BTreeMap::new();

        for record in table.records() {
            let bucket = map
                .entry(YearMonth::of(&record.order_purchase_timestamp))
                .or_insert(0.0);
            if let Some(price) = record.price {
                *bucket += price;
            }
        }

        map.into_iter()
            .map(|(month, revenue)| MonthlyRevenue { month, revenue })
            .collect()
    }

    /// Row counts per payment method, largest first.
    ///
    /// Covers every non-empty value observed; rows with an empty payment type
    /// are not counted.
    pub fn payment_type_distribution(table: &OrderTable) -> Vec<PaymentTypeCount> {
        count_descending(
            table
                .records()
                .iter()
                .map(|r| r.payment_type.as_str())
                .filter(|p| !p.is_empty()),
        )
        .into_iter()
        .map(|(payment_type, customer_count)| PaymentTypeCount {
            payment_type,
            customer_count,
        })
        .collect()
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Count occurrences of each key, sorted by count descending. Ties keep
/// first-appearance order.
fn count_descending<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match index.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }

    // sort_by is stable.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ── Tests ─────────────────────────────────────────────────────────────────────
