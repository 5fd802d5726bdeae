//! # Selection Analytics
//!
//! Turns a chosen `Selection` into the figures a user reads: total price,
//! total profit and total return, plus one line per chosen stock.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no knowledge of how the selection was found. It
//!   depends only on `core-types`.
//! - **Round at the edge:** all arithmetic runs at full `Decimal` precision;
//!   figures are rounded to cents only as they enter the report.
//!
//! ## Public API
//!
//! - `ReportEngine` / `report`: build a `SelectionReport` from a `Selection`.
//! - `SelectionReport`, `ReportLine`: the serializable output.
//! - `AnalyticsError`: the errors this crate can return.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{ReportEngine, report, round_currency};
pub use error::AnalyticsError;
pub use report::{ReportLine, SelectionReport};
