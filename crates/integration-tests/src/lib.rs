//! Integration tests for ProfitLens.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p profitlens-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `profitability_pipeline` - End-to-end reports and pipeline properties
//! - `source_adapters` - Upstream payload shapes through to report rows
//! - `calendar_timezone` - Calendar dates under different process time zones
//!
//! This crate also provides the fixture builders the tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use profitlens_core::{
    Catalog, CostOfGoods, DateRange, HealthThresholds, ProfitReport, ReportInputs, SalesRecord,
    parse_record_date,
};
use rust_decimal::Decimal;

/// Builder for a single sales record.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: SalesRecord,
}

impl RecordBuilder {
    /// Start a record for `asin`.
    #[must_use]
    pub fn new(asin: &str) -> Self {
        Self {
            record: SalesRecord {
                asin: asin.to_owned(),
                ..SalesRecord::default()
            },
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: &str) -> Self {
        self.record.parent_asin = Some(parent.to_owned());
        self
    }

    /// Set the date from text such as `2024-11-05` or `2024-11-05T23:59:59`.
    #[must_use]
    pub fn date(mut self, date: &str) -> Self {
        self.record.date = parse_record_date(date);
        self
    }

    #[must_use]
    pub fn sales(mut self, sales: i64) -> Self {
        self.record.sales_amount = Decimal::from(sales);
        self
    }

    #[must_use]
    pub fn gross_profit(mut self, gross_profit: i64) -> Self {
        self.record.gross_profit_amount = Decimal::from(gross_profit);
        self
    }

    /// Set a gross profit that is not a whole amount.
    #[must_use]
    pub const fn gross_profit_exact(mut self, gross_profit: Decimal) -> Self {
        self.record.gross_profit_amount = gross_profit;
        self
    }

    #[must_use]
    pub const fn units(mut self, units: i64) -> Self {
        self.record.units_sold = units;
        self
    }

    /// Set ad spend, total fees and Amazon fees.
    #[must_use]
    pub fn costs(mut self, ad_spend: i64, fees: i64, amazon_fees: i64) -> Self {
        self.record.ppc_spend_amount = Decimal::from(ad_spend);
        self.record.total_fee_amount = Decimal::from(fees);
        self.record.amazon_fee_amount = Decimal::from(amazon_fees);
        self
    }

    #[must_use]
    pub fn build(self) -> SalesRecord {
        self.record
    }
}

/// Run the full pipeline with default thresholds and an empty catalog.
#[must_use]
pub fn build_report(
    records: &[SalesRecord],
    costs: &CostOfGoods,
    range: Option<&DateRange>,
) -> ProfitReport {
    let catalog = Catalog::new();
    let inputs = ReportInputs {
        records,
        costs,
        catalog: &catalog,
        range,
    };
    ProfitReport::build(&inputs, &HealthThresholds::default())
}
