//! Terminal UI layer for the order dashboard.
//!
//! Provides themes, the header, sidebar menu and chart components, the table
//! and dashboard views, and the application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
