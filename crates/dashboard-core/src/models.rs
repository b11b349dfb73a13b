use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use serde::{Serialize, Serializer};

/// The closed list of order statuses reported by the status distribution,
/// in display order.
pub const ORDER_STATUSES: [&str; 5] = ["delivered", "canceled", "shipped", "pending", "invoiced"];

/// How many customers each RFM ranking shows.
pub const TOP_CUSTOMERS: usize = 5;

/// A single order line read from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    /// Order identifier; one customer may own many.
    pub order_id: String,
    /// Stable customer identifier shared by all of a customer's orders.
    pub customer_unique_id: String,
    /// Region (state) code of the customer.
    pub customer_state: String,
    /// Raw order status, e.g. `"delivered"`.
    pub order_status: String,
    /// When the order was placed.
    pub order_purchase_timestamp: NaiveDateTime,
    /// When the order reached the customer; `None` for undelivered orders.
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    /// Line price. `None` when the cell was empty.
    pub price: Option<f64>,
    /// Payment method, e.g. `"credit_card"`. Empty when unknown.
    pub payment_type: String,
}

// ── Summary rows ──────────────────────────────────────────────────────────────

/// Number of order rows for one customer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCount {
    pub state: String,
    pub customer_count: usize,
}

/// Number of orders carrying one reference status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Number of order rows paid with one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentTypeCount {
    pub payment_type: String,
    pub customer_count: usize,
}

/// Total revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: YearMonth,
    pub revenue: f64,
}

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// A calendar month. Orders chronologically; displays as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `ts`.
    pub fn of(ts: &NaiveDateTime) -> Self {
        Self::new(ts.year(), ts.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── RFM ───────────────────────────────────────────────────────────────────────

/// Recency / frequency / monetary values for one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmSummary {
    pub customer_unique_id: String,
    /// Whole days between the dataset's latest purchase and this customer's
    /// latest delivery. `None` when the customer has no delivered order.
    /// Negative values are kept as-is.
    pub recency: Option<i64>,
    /// Number of distinct order ids.
    pub frequency: usize,
    /// Sum of the customer's prices.
    pub monetary: f64,
}

/// One of the three RFM dimensions, used to rank customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMetric {
    Recency,
    Frequency,
    Monetary,
}

impl RfmMetric {
    pub const ALL: [RfmMetric; 3] = [RfmMetric::Recency, RfmMetric::Frequency, RfmMetric::Monetary];

    /// Lower-case column name, e.g. `"recency"`.
    pub fn column(&self) -> &'static str {
        match self {
            RfmMetric::Recency => "recency",
            RfmMetric::Frequency => "frequency",
            RfmMetric::Monetary => "monetary",
        }
    }

    /// Chart title, e.g. `"By Recency"`.
    pub fn title(&self) -> &'static str {
        match self {
            RfmMetric::Recency => "By Recency",
            RfmMetric::Frequency => "By Frequency",
            RfmMetric::Monetary => "By Monetary",
        }
    }

    /// Value of this metric for `row`, or `None` when it is undefined.
    pub fn value(&self, row: &RfmSummary) -> Option<f64> {
        match self {
            RfmMetric::Recency => row.recency.map(|days| days as f64),
            RfmMetric::Frequency => Some(row.frequency as f64),
            RfmMetric::Monetary => Some(row.monetary),
        }
    }
}
