//! Data layer for the order dashboard.
//!
//! Loads the order CSV into an immutable [`table::OrderTable`], runs the
//! descriptive aggregations and RFM segmentation over it, and bundles every
//! result into a [`analysis::DashboardReport`] for the UI.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod rfm;
pub mod table;

pub use dashboard_core as core;
