//! Core domain types for the order dashboard.
//!
//! Holds the order record and summary models, the shared error type, CLI
//! settings, timestamp parsing helpers and number formatting used by the
//! data and UI crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
