//! Report-wide totals.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CostOfGoods, CurrencyCode, HealthStatus};

use super::rows::{ProductRow, profit_margin, round_margin};

/// Totals across the top-level rows of a report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    /// Currency of the first row that reported one.
    pub currency_code: Option<CurrencyCode>,
    /// Number of top-level rows.
    pub products: usize,
    pub units: i64,
    pub sales: Decimal,
    pub ad_spend: Decimal,
    pub fees: Decimal,
    pub gross_profit: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
    pub refunds: Decimal,
    /// Overall net margin, rounded down to 2 places.
    pub profit_margin: Decimal,
    pub good: usize,
    pub warn: usize,
    pub bad: usize,
    /// Selling ASINs (leaf rows with units) that have no cost of goods
    /// entered, so their net profit is overstated.
    pub missing_costs: usize,
}

impl ProfitSummary {
    /// Summarize `rows` as produced by the row builder.
    #[must_use]
    pub fn from_rows(rows: &[ProductRow], costs: &CostOfGoods) -> Self {
        let mut summary = Self {
            products: rows.len(),
            ..Self::default()
        };

        for row in rows {
            summary.units = summary.units.saturating_add(row.units);
            summary.sales += row.sales;
            summary.ad_spend += row.ad_spend;
            summary.fees += row.fees;
            summary.gross_profit += row.gross_profit;
            summary.total_cost += row.total_cost;
            summary.net_profit += row.net_profit;
            summary.refunds += row.refunds;
            if summary.currency_code.is_none() {
                summary.currency_code = row.currency_code;
            }
            match row.health_status {
                HealthStatus::Good => summary.good += 1,
                HealthStatus::Warn => summary.warn += 1,
                HealthStatus::Bad => summary.bad += 1,
            }
        }

        summary.missing_costs = rows
            .iter()
            .flat_map(|row| {
                if row.children.is_empty() {
                    std::slice::from_ref(row)
                } else {
                    row.children.as_slice()
                }
            })
            .filter(|leaf| leaf.units > 0 && !costs.is_entered(&leaf.asin))
            .count();

        summary.profit_margin = round_margin(profit_margin(summary.net_profit, summary.sales));
        summary
    }

    /// Rows flagged `warn` or `bad`.
    #[must_use]
    pub const fn needing_attention(&self) -> usize {
        self.warn + self.bad
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profitability::HealthThresholds;
    use crate::profitability::aggregate::AggregatedAsin;
    use crate::profitability::group::group_by_parent;
    use crate::profitability::rows::{RowContext, build_rows};
    use crate::types::{Asin, Catalog, SalesTotals};

    fn member(asin: &str, parent: &str, sales: i64, gross: i64, units: i64) -> AggregatedAsin {
        AggregatedAsin {
            asin: Asin::parse(asin).unwrap(),
            parent_asin: Asin::parse(parent).unwrap(),
            currency_code: Some(CurrencyCode::USD),
            totals: SalesTotals {
                sales: Decimal::from(sales),
                gross_profit: Decimal::from(gross),
                units,
                ..SalesTotals::default()
            },
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = ProfitSummary::from_rows(&[], &CostOfGoods::new());
        assert_eq!(summary, ProfitSummary::default());
    }

    #[test]
    fn test_summary_totals_and_counts() {
        let mut costs = CostOfGoods::new();
        costs.set("A1", Decimal::from(1)).unwrap();
        let catalog = Catalog::new();
        let thresholds = HealthThresholds::default();
        let ctx = RowContext {
            costs: &costs,
            catalog: &catalog,
            thresholds: &thresholds,
        };
        let buckets = group_by_parent(vec![
            member("A1", "P1", 100, 40, 10),
            member("A2", "P1", 50, 20, 5),
            member("S1", "S1", 100, -5, 1),
        ]);
        let rows = build_rows(&buckets, &ctx);
        let summary = ProfitSummary::from_rows(&rows, &costs);

        assert_eq!(summary.products, 2);
        assert_eq!(summary.units, 16);
        assert_eq!(summary.sales, Decimal::from(250));
        assert_eq!(summary.currency_code, Some(CurrencyCode::USD));
        assert_eq!(summary.bad, 1);
        assert_eq!(summary.needing_attention(), 1);
        // A2 and S1 sell without an entered cost.
        assert_eq!(summary.missing_costs, 2);
    }
}
