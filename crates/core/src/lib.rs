//! ProfitLens Core - Profitability aggregation for Amazon sellers.
//!
//! Turns raw per-day, per-ASIN sales records into a table of product rows
//! grouped by parent ASIN, with cost of goods, net profit, margin and a
//! health status on every row.
//!
//! # Architecture
//!
//! The core crate does no I/O. Hosts fetch and load data, then hand it to
//! the pipeline as plain values; the pipeline is a pure function of them.
//!
//! # Modules
//!
//! - [`types`] - ASINs, money, sales records, cost of goods, catalog, date ranges
//! - [`sources`] - Decoding of the upstream payload shapes into sales records
//! - [`profitability`] - Filter, aggregate, group, build rows, suggest, summarize

#![cfg_attr(not(test), forbid(unsafe_code))]

mod lenient;
pub mod profitability;
pub mod sources;
pub mod types;

pub use lenient::parse_decimal;
pub use profitability::{HealthThresholds, ProductRow, ProfitReport, ProfitSummary, ReportInputs, Suggestion};
pub use sources::SalesPayload;
pub use types::*;
