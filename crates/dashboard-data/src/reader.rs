//! CSV loading for the order dashboard.
//!
//! Reads the order dataset into [`OrderRecord`]s, parsing the purchase and
//! delivery columns into timestamps. Any structural problem (missing file,
//! missing column, unparseable timestamp) is fatal and returned as a
//! [`DashboardError`].

use std::io::Read;
use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::OrderRecord;
use dashboard_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, info};

use crate::table::OrderTable;

/// Columns the aggregations read. Other columns in the file are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "order_id",
    "customer_unique_id",
    "customer_state",
    "order_status",
    "order_purchase_timestamp",
    "order_delivered_customer_date",
    "price",
    "payment_type",
];

const PURCHASE_COLUMN: &str = "order_purchase_timestamp";
const DELIVERY_COLUMN: &str = "order_delivered_customer_date";

/// Cell values that mean "no value", besides an empty cell.
pub const MISSING_MARKERS: [&str; 8] = ["NaN", "nan", "NA", "N/A", "null", "NULL", "NaT", "None"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the order dataset from the CSV file at `path`.
pub fn load_orders(path: &Path) -> Result<OrderTable> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_orders_from_reader(file, path.display().to_string())
}

/// Load the order dataset from any CSV byte stream.
///
/// `source` labels the data in errors and in the resulting table.
pub fn load_orders_from_reader<R: Read>(reader: R, source: impl Into<String>) -> Result<OrderTable> {
    let source = source.into();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| DashboardError::Csv { line: 1, source })?
        .clone();
    check_required_columns(&headers, &source)?;

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    loop {
        let more = csv_reader
            .read_record(&mut row)
            .map_err(|source| DashboardError::Csv {
                line: error_line(&source, csv_reader.position().line()),
                source,
            })?;
        if !more {
            break;
        }
        // Quoted fields may span lines, so take the line from the record.
        let line = row.position().map_or(csv_reader.position().line(), |p| p.line());
        let raw: RawOrderRow = row
            .deserialize(Some(&headers))
            .map_err(|source| DashboardError::Csv { line, source })?;
        records.push(raw.into_record(line)?);
    }

    let table = OrderTable::from_records(records, source);
    info!("Loaded {} order rows from {}", table.len(), table.source());
    debug!(
        "{} rows without a delivery date",
        table.len() - table.delivered_rows()
    );
    Ok(table)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn error_line(err: &csv::Error, fallback: u64) -> u64 {
    err.position().map_or(fallback, |p| p.line())
}

/// `None` for absent cells and [`MISSING_MARKERS`].
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !MISSING_MARKERS.contains(&v.as_str()))
}

fn check_required_columns(headers: &csv::StringRecord, source: &str) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn {
                column: column.to_string(),
                source_name: source.to_string(),
            });
        }
    }
    Ok(())
}

/// One CSV row before timestamp and number parsing.
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    order_id: String,
    customer_unique_id: String,
    customer_state: String,
    order_status: String,
    order_purchase_timestamp: Option<String>,
    order_delivered_customer_date: Option<String>,
    price: Option<String>,
    payment_type: Option<String>,
}

impl RawOrderRow {
    fn into_record(self, line: u64) -> Result<OrderRecord> {
        let purchase_raw = self.order_purchase_timestamp.unwrap_or_default();
        let order_purchase_timestamp =
            parse_timestamp(&purchase_raw).ok_or_else(|| DashboardError::TimestampParse {
                column: PURCHASE_COLUMN.to_string(),
                line,
                value: purchase_raw.clone(),
            })?;

        let order_delivered_customer_date = match present(self.order_delivered_customer_date) {
            None => None,
            Some(raw) => Some(parse_timestamp(&raw).ok_or_else(|| {
                DashboardError::TimestampParse {
                    column: DELIVERY_COLUMN.to_string(),
                    line,
                    value: raw.clone(),
                }
            })?),
        };

        let price = match present(self.price) {
            None => None,
            Some(raw) => {
                let invalid = || DashboardError::InvalidNumber {
                    column: "price".to_string(),
                    line,
                    value: raw.clone(),
                };
                let value = raw.parse::<f64>().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                Some(value)
            }
        };

        Ok(OrderRecord {
            order_id: self.order_id,
            customer_unique_id: self.customer_unique_id,
            customer_state: self.customer_state,
            order_status: self.order_status,
            order_purchase_timestamp,
            order_delivered_customer_date,
            price,
            payment_type: present(self.payment_type).unwrap_or_default(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
