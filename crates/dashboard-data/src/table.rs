//! The loaded dataset, shared read-only by every aggregation.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use dashboard_core::error::Result;
use dashboard_core::models::OrderRecord;

/// Immutable in-memory order table.
///
/// Built once at startup and passed by reference into each aggregation; no
/// aggregation mutates it.
#[derive(Debug, Clone, Default)]
pub struct OrderTable {
    records: Vec<OrderRecord>,
    source: String,
}

impl OrderTable {
    /// Load the CSV dataset at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        crate::reader::load_orders(path)
    }

    /// Wrap already-parsed records, e.g. synthetic rows in tests.
    pub fn from_records(records: Vec<OrderRecord>, source: impl Into<String>) -> Self {
        Self {
            records,
            source: source.into(),
        }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Human-readable origin of the data (file path or label).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest purchase timestamp in the table, the reference point for
    /// recency.
    pub fn max_purchase_timestamp(&self) -> Option<NaiveDateTime> {
        self.records
            .iter()
            .map(|r| r.order_purchase_timestamp)
            .max()
    }

    /// Number of distinct `customer_unique_id` values.
    pub fn distinct_customers(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.customer_unique_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Rows that carry a delivery date.
    pub fn delivered_rows(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.order_delivered_customer_date.is_some())
            .count()
    }
}
