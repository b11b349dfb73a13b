pub mod charts;
pub mod header;
pub mod menu;
