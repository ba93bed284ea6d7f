//! Core types for ProfitLens.
//!
//! This module provides type-safe wrappers for the domain concepts the
//! profitability pipeline works with.

pub mod asin;
pub mod catalog;
pub mod cost;
pub mod date_range;
pub mod money;
pub mod record;
pub mod status;

pub use asin::{Asin, AsinError};
pub use catalog::{Catalog, ProductCatalogEntry};
pub use cost::{CostError, CostOfGoods};
pub use date_range::{
    DATE_FORMAT, DateRange, DateRangeError, format_calendar_date, parse_calendar_date,
    parse_record_date,
};
pub use money::{CurrencyCode, Money};
pub use record::{SalesRecord, SalesTotals};
pub use status::HealthStatus;
