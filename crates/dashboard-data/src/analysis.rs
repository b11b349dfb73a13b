//! Compute-all pipeline for the order dashboard.
//!
//! Runs every aggregation over one [`OrderTable`] and bundles the results into
//! a [`DashboardReport`] ready for the UI layer or JSON output.

use chrono::Utc;
use dashboard_core::models::{
    MonthlyRevenue, PaymentTypeCount, RfmMetric, RfmSummary, StateCount, StatusCount,
    ORDER_STATUSES, TOP_CUSTOMERS,
};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::OrderAggregator;
use crate::rfm::{rfm_analysis, top_customers};
use crate::table::OrderTable;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the rows were loaded from.
    pub source: String,
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    pub rows: usize,
    pub customers: usize,
    /// Rows carrying a delivery date.
    pub delivered_rows: usize,
    /// Wall-clock seconds spent running the aggregations.
    pub compute_time_seconds: f64,
}

/// Every summary the dashboard shows, computed from one table.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub metadata: ReportMetadata,
    pub customers_by_state: Vec<StateCount>,
    pub order_status: Vec<StatusCount>,
    /// `None` when no row has been delivered.
    pub mean_shipping_days: Option<f64>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub rfm: Vec<RfmSummary>,
    pub payment_types: Vec<PaymentTypeCount>,
}

impl DashboardReport {
    /// The first `n` RFM rows.
    pub fn rfm_preview(&self, n: usize) -> &[RfmSummary] {
        &self.rfm[..n.min(self.rfm.len())]
    }

    /// The top customers by `metric`, largest first.
    pub fn top_customers(&self, metric: RfmMetric) -> Vec<RfmSummary> {
        top_customers(&self.rfm, metric, TOP_CUSTOMERS)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every aggregation over `table`.
///
/// Apart from `generated_at` and the compute time, two calls on the same table
/// return identical reports.
pub fn build_report(table: &OrderTable) -> DashboardReport {
    let start = std::time::Instant::now();

    let customers_by_state = OrderAggregator::customer_count_by_state(table);
    let order_status = OrderAggregator::order_status_distribution(table, &ORDER_STATUSES);
    let mean_shipping_days = OrderAggregator::mean_shipping_time(table);
    let monthly_revenue = OrderAggregator::monthly_revenue(table);
    let rfm = rfm_analysis(table);
    let payment_types = OrderAggregator::payment_type_distribution(table);

    let compute_time = start.elapsed().as_secs_f64();
    debug!(
        "Report over {} rows computed in {:.3}s",
        table.len(),
        compute_time
    );

    let metadata = ReportMetadata {
        source: table.source().to_string(),
        generated_at: Utc::now().to_rfc3339(),
        rows: table.len(),
        customers: table.distinct_customers(),
        delivered_rows: table.delivered_rows(),
        compute_time_seconds: compute_time,
    };

    DashboardReport {
        metadata,
        customers_by_state,
        order_status,
        mean_shipping_days,
        monthly_revenue,
        rfm,
        payment_types,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::load_orders_from_reader;

    const SAMPLE: &str = "\
order_id,customer_unique_id,customer_state,order_status,order_purchase_timestamp,order_delivered_customer_date,price,payment_type
o1,alice,SP,delivered,2017-10-02 10:56:33,2017-10-10 21:25:13,29.99,credit_card
o2,bob,RJ,delivered,2017-11-18 19:28:06,2017-12-02 00:28:42,118.70,boleto
o2,bob,RJ,delivered,2017-11-18 19:28:06,2017-12-02 00:28:42,12.00,boleto
o3,carol,SP,shipped,2018-02-13 21:18:39,,45.00,voucher
o4,alice,SP,canceled,2018-02-20 08:00:00,,,credit_card
";

    fn sample_table() -> OrderTable {
        load_orders_from_reader(SAMPLE.as_bytes(), "sample").unwrap()
    }

    #[test]
    fn test_build_report_metadata_fields_populated() {
        let report = build_report(&sample_table());

        assert_eq!(report.metadata.source, "sample");
        assert_eq!(report.metadata.rows, 5);
        assert_eq!(report.metadata.customers, 3);
        assert_eq!(report.metadata.delivered_rows, 3);
        assert!(!report.metadata.generated_at.is_empty());
        assert!(report.metadata.compute_time_seconds >= 0.0);
    }

    #[test]
    fn test_build_report_sections() {
        let report = build_report(&sample_table());

        assert_eq!(report.customers_by_state[0].state, "SP");
        assert_eq!(report.customers_by_state[0].customer_count, 3);
        assert_eq!(report.order_status.len(), ORDER_STATUSES.len());
        assert_eq!(report.order_status[0].count, 3);
        assert_eq!(report.monthly_revenue.len(), 3);
        assert_eq!(report.rfm.len(), 3);
        assert_eq!(report.payment_types[0].payment_type, "credit_card");

        // alice: 8 days, bob: 13 days twice
        let mean = report.mean_shipping_days.unwrap();
        assert!((mean - 34.0 / 3.0).abs() < 1e-9, "mean = {mean}");
    }

    #[test]
    fn test_build_report_on_empty_table() {
        let report = build_report(&OrderTable::default());

        assert_eq!(report.metadata.rows, 0);
        assert!(report.customers_by_state.is_empty());
        assert!(report.order_status.iter().all(|s| s.count == 0));
        assert!(report.mean_shipping_days.is_none());
        assert!(report.monthly_revenue.is_empty());
        assert!(report.rfm.is_empty());
        assert!(report.payment_types.is_empty());
        assert!(report.rfm_preview(5).is_empty());
        assert!(report.top_customers(RfmMetric::Monetary).is_empty());
    }

    #[test]
    fn test_build_report_is_repeatable() {
        let table = sample_table();
        let a = build_report(&table);
        let b = build_report(&table);

        assert_eq!(a.customers_by_state, b.customers_by_state);
        assert_eq!(a.order_status, b.order_status);
        assert_eq!(a.mean_shipping_days, b.mean_shipping_days);
        assert_eq!(a.monthly_revenue, b.monthly_revenue);
        assert_eq!(a.rfm, b.rfm);
        assert_eq!(a.payment_types, b.payment_types);
    }

    #[test]
    fn test_rfm_preview_truncates() {
        let report = build_report(&sample_table());
        assert_eq!(report.rfm_preview(2).len(), 2);
        assert_eq!(report.rfm_preview(50).len(), 3);
    }

    #[test]
    fn test_top_customers_by_monetary() {
        let report = build_report(&sample_table());
        let top = report.top_customers(RfmMetric::Monetary);

        assert_eq!(top[0].customer_unique_id, "bob");
        assert!((top[0].monetary - 130.70).abs() < 1e-9);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_report_serialises_to_json() {
        let report = build_report(&sample_table());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["metadata"]["rows"], 5);
        assert_eq!(json["monthly_revenue"][0]["month"], "2017-10");
        assert!(json["rfm"].is_array());
    }
}
