//! RFM (recency, frequency, monetary) segmentation.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use dashboard_core::models::{RfmMetric, RfmSummary};
use dashboard_core::time_utils::whole_days_between;
use tracing::debug;

use crate::table::OrderTable;

#[derive(Default)]
struct CustomerAccumulator<'a> {
    latest_delivery: Option<NaiveDateTime>,
    order_ids: HashSet<&'a str>,
    monetary: f64,
}

/// One [`RfmSummary`] per distinct customer, ordered by `customer_unique_id`.
///
/// Recency is measured from the latest purchase in the whole table to the
/// customer's latest delivery, so it can be negative. Customers without any
/// delivered order get `recency: None`.
pub fn rfm_analysis(table: &OrderTable) -> Vec<RfmSummary> {
    let Some(reference) = table.max_purchase_timestamp() else {
        return Vec::new();
    };

    let mut customers: BTreeMap<&str, CustomerAccumulator<'_>> = BTreeMap::new();
    for record in table.records() {
        let acc = customers
            .entry(record.customer_unique_id.as_str())
            .or_default();

        if let Some(delivered) = record.order_delivered_customer_date {
            acc.latest_delivery = Some(match acc.latest_delivery {
                Some(current) => current.max(delivered),
                None => delivered,
            });
        }
        acc.order_ids.insert(record.order_id.as_str());
        if let Some(price) = record.price {
            acc.monetary += price;
        }
    }

    let rows: Vec<RfmSummary> = customers
        .into_iter()
        .map(|(customer, acc)| RfmSummary {
            customer_unique_id: customer.to_string(),
            recency: acc
                .latest_delivery
                .map(|delivered| whole_days_between(reference, delivered)),
            frequency: acc.order_ids.len(),
            monetary: acc.monetary,
        })
        .collect();

    debug!(
        "RFM computed for {} customers ({} without deliveries)",
        rows.len(),
        rows.iter().filter(|r| r.recency.is_none()).count()
    );
    rows
}

/// The `n` rows with the largest `metric` value, largest first.
///
/// Equal values keep their input order. Rows where the metric is undefined
/// (absent recency) are left out.
pub fn top_customers(rfm: &[RfmSummary], metric: RfmMetric, n: usize) -> Vec<RfmSummary> {
    let mut ranked: Vec<(f64, &RfmSummary)> = rfm
        .iter()
        .filter_map(|row| metric.value(row).map(|v| (v, row)))
        .collect();

    // Stable sort; total_cmp gives NaN a fixed place instead of panicking.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().take(n).map(|(_, row)| row.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::OrderRecord;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 8, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn row(
        customer: &str,
        order_id: &str,
        purchased: u32,
        delivered: Option<u32>,
        price: Option<f64>,
    ) -> OrderRecord {
        OrderRecord {
            order_id: order_id.to_string(),
            customer_unique_id: customer.to_string(),
            customer_state: "SP".to_string(),
            order_status: "delivered".to_string(),
            order_purchase_timestamp: day(purchased),
            order_delivered_customer_date: delivered.map(day),
            price,
            payment_type: "credit_card".to_string(),
        }
    }

    fn summary(customer: &str, recency: Option<i64>, frequency: usize, monetary: f64) -> RfmSummary {
        RfmSummary {
            customer_unique_id: customer.to_string(),
            recency,
            frequency,
            monetary,
        }
    }

    #[test]
    fn test_frequency_counts_distinct_orders_and_monetary_sums_prices() {
        let table = OrderTable::from_records(
            vec![
                row("A", "o1", 1, Some(3), Some(10.0)),
                row("A", "o2", 2, Some(4), Some(20.0)),
                row("A", "o2", 2, Some(4), Some(30.0)),
            ],
            "t",
        );
        let rfm = rfm_analysis(&table);

        assert_eq!(rfm.len(), 1);
        assert_eq!(rfm[0].customer_unique_id, "A");
        assert_eq!(rfm[0].frequency, 2);
        assert!((rfm[0].monetary - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_row_per_distinct_customer() {
        let table = OrderTable::from_records(
            vec![
                row("b", "o1", 1, Some(2), Some(1.0)),
                row("a", "o2", 2, Some(5), Some(1.0)),
                row("c", "o3", 3, None, Some(1.0)),
                row("a", "o4", 4, Some(6), Some(1.0)),
            ],
            "t",
        );
        let rfm = rfm_analysis(&table);

        assert_eq!(rfm.len(), table.distinct_customers());
        let ids: Vec<&str> = rfm.iter().map(|r| r.customer_unique_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_recency_from_latest_purchase_to_latest_delivery() {
        let table = OrderTable::from_records(
            vec![
                row("a", "o1", 1, Some(5), Some(1.0)),
                row("a", "o2", 3, Some(8), Some(1.0)),
                row("b", "o3", 20, None, Some(1.0)),
            ],
            "t",
        );
        let rfm = rfm_analysis(&table);

        // latest purchase is day 20, a's latest delivery is day 8
        assert_eq!(rfm[0].recency, Some(12));
        assert_eq!(rfm[1].recency, None);
    }

    #[test]
    fn test_recency_can_be_negative() {
        let table = OrderTable::from_records(vec![row("a", "o1", 1, Some(4), Some(1.0))], "t");
        assert_eq!(rfm_analysis(&table)[0].recency, Some(-3));
    }

    #[test]
    fn test_absent_prices_are_skipped() {
        let table = OrderTable::from_records(
            vec![
                row("a", "o1", 1, Some(2), None),
                row("a", "o2", 1, Some(2), Some(4.5)),
            ],
            "t",
        );
        let rfm = rfm_analysis(&table);
        assert!((rfm[0].monetary - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_table_gives_no_rows() {
        assert!(rfm_analysis(&OrderTable::default()).is_empty());
    }

    #[test]
    fn test_top_customers_descending_and_truncated() {
        let rfm = vec![
            summary("a", Some(1), 1, 10.0),
            summary("b", Some(3), 4, 5.0),
            summary("c", Some(2), 2, 50.0),
            summary("d", Some(9), 1, 20.0),
        ];
        let top: Vec<String> = top_customers(&rfm, RfmMetric::Monetary, 2)
            .into_iter()
            .map(|r| r.customer_unique_id)
            .collect();
        assert_eq!(top, vec!["c", "d"]);
    }

    #[test]
    fn test_top_customers_ties_are_stable() {
        let rfm = vec![
            summary("x", Some(1), 2, 1.0),
            summary("y", Some(1), 3, 1.0),
            summary("z", Some(1), 2, 1.0),
        ];
        let top: Vec<String> = top_customers(&rfm, RfmMetric::Frequency, 5)
            .into_iter()
            .map(|r| r.customer_unique_id)
            .collect();
        assert_eq!(top, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_top_customers_recency_skips_undelivered() {
        let rfm = vec![
            summary("a", None, 1, 1.0),
            summary("b", Some(4), 1, 1.0),
            summary("c", Some(-2), 1, 1.0),
        ];
        let top = top_customers(&rfm, RfmMetric::Recency, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].customer_unique_id, "b");
        assert_eq!(top[1].customer_unique_id, "c");
    }
}
