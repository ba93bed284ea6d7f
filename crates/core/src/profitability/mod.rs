//! The profitability pipeline.
//!
//! Raw daily sales records go through four stages:
//!
//! 1. [`filter_by_date`] keeps the records inside the selected range.
//! 2. [`aggregate_by_asin`] sums them per ASIN.
//! 3. [`group_by_parent`] buckets ASINs under their parent.
//! 4. [`build_rows`] derives cost, profit, margin and health per row.
//!
//! [`ProfitReport::build`] runs all of them and adds suggestions and a
//! summary. Every stage is a pure function of its inputs.

pub mod aggregate;
pub mod filter;
pub mod group;
pub mod rows;
pub mod suggestions;
pub mod summary;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Catalog, CostOfGoods, DateRange, SalesRecord};

pub use aggregate::{AggregatedAsin, aggregate_by_asin};
pub use filter::filter_by_date;
pub use group::{ParentBucket, group_by_parent};
pub use rows::{ProductRow, RowContext, build_rows, health_status, profit_margin};
pub use suggestions::{Suggestion, suggest, suggestions_for};
pub use summary::ProfitSummary;

/// Margin and cost thresholds used for health and suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthThresholds {
    /// Margin percentage below which a row is `warn`.
    pub warn_margin: Decimal,
    /// Cost-to-sales percentage above which a supplier note is added.
    pub supplier_cost_ratio: Decimal,
}

impl HealthThresholds {
    pub const DEFAULT_WARN_MARGIN: Decimal = Decimal::TEN;
    pub const DEFAULT_SUPPLIER_COST_RATIO: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            warn_margin: Self::DEFAULT_WARN_MARGIN,
            supplier_cost_ratio: Self::DEFAULT_SUPPLIER_COST_RATIO,
        }
    }
}

/// Everything the pipeline reads. Nothing is mutated.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub records: &'a [SalesRecord],
    pub costs: &'a CostOfGoods,
    pub catalog: &'a Catalog,
    /// `None` means all time.
    pub range: Option<&'a DateRange>,
}

/// Top-level product rows for `inputs`, sorted by sales (highest first).
#[must_use]
pub fn product_rows(inputs: &ReportInputs<'_>, thresholds: &HealthThresholds) -> Vec<ProductRow> {
    let filtered = filter_by_date(inputs.records, inputs.range);
    let aggregated = aggregate_by_asin(filtered);
    let buckets = group_by_parent(aggregated);
    let ctx = RowContext {
        costs: inputs.costs,
        catalog: inputs.catalog,
        thresholds,
    };
    build_rows(&buckets, &ctx)
}

/// A complete profitability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub range: Option<DateRange>,
    pub rows: Vec<ProductRow>,
    pub suggestions: Vec<Suggestion>,
    pub summary: ProfitSummary,
}

impl ProfitReport {
    /// Run the pipeline and collect rows, suggestions and summary.
    #[tracing::instrument(skip_all, fields(records = inputs.records.len()))]
    #[must_use]
    pub fn build(inputs: &ReportInputs<'_>, thresholds: &HealthThresholds) -> Self {
        let rows = product_rows(inputs, thresholds);
        let suggestions = suggestions_for(&rows, thresholds);
        let summary = ProfitSummary::from_rows(&rows, inputs.costs);

        tracing::debug!(
            rows = rows.len(),
            suggestions = suggestions.len(),
            "Built profitability report"
        );

        Self {
            range: inputs.range.copied(),
            rows,
            suggestions,
            summary,
        }
    }
}
