//! Report rows with derived profit figures.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::types::{Asin, Catalog, CostOfGoods, CurrencyCode, HealthStatus, SalesTotals};

use super::HealthThresholds;
use super::aggregate::AggregatedAsin;
use super::group::ParentBucket;

/// One line of the profitability table.
///
/// Top-level rows are parents (or standalone products); their `children`
/// hold the variation rows. Child rows never have children of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub asin: Asin,
    /// Parent ASIN for child rows, `None` on top-level rows.
    pub parent_asin: Option<Asin>,
    pub name: String,
    pub sku: String,
    pub units: i64,
    pub sales: Decimal,
    /// Entered cost of goods per unit, zero when not entered.
    pub cost_per_unit: Decimal,
    /// `cost_per_unit × units`.
    pub total_cost: Decimal,
    pub ad_spend: Decimal,
    /// All fees combined.
    pub fees: Decimal,
    pub amazon_fees: Decimal,
    pub fba_fees: Decimal,
    pub storage_fees: Decimal,
    pub gross_profit: Decimal,
    /// `gross_profit − total_cost`.
    pub net_profit: Decimal,
    pub refunds: Decimal,
    /// Net profit as a percentage of sales, rounded down to 2 places. Zero
    /// without sales.
    pub profit_margin: Decimal,
    pub health_status: HealthStatus,
    pub is_expandable: bool,
    pub children: Vec<ProductRow>,
    pub children_count: usize,
    pub currency_code: Option<CurrencyCode>,
}

impl ProductRow {
    /// This row followed by its children.
    pub fn flatten(&self) -> impl Iterator<Item = &Self> {
        std::iter::once(self).chain(self.children.iter())
    }

    /// Whether this is a child (variation) row.
    #[must_use]
    pub const fn is_child(&self) -> bool {
        self.parent_asin.is_some()
    }
}

/// Lookups shared by every row built in one pass.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub costs: &'a CostOfGoods,
    pub catalog: &'a Catalog,
    pub thresholds: &'a HealthThresholds,
}

/// Net profit as a percentage of sales.
///
/// Zero when there are no positive sales, so callers never divide by zero.
#[must_use]
pub fn profit_margin(net_profit: Decimal, sales: Decimal) -> Decimal {
    if sales <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    net_profit
        .checked_div(sales)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Round a margin to 2 places toward negative infinity.
///
/// A margin below a 2-place threshold never displays as the threshold:
/// 9.996% shows as 9.99%, and a tiny loss stays negative.
#[must_use]
pub fn round_margin(margin: Decimal) -> Decimal {
    margin.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

/// Health for a row. Rows without positive sales are `good`: there is no
/// margin to judge.
#[must_use]
pub fn health_status(margin: Decimal, sales: Decimal, thresholds: &HealthThresholds) -> HealthStatus {
    if sales <= Decimal::ZERO {
        return HealthStatus::Good;
    }
    HealthStatus::from_margin(margin, thresholds.warn_margin)
}

/// Build the top-level rows, sorted by sales (highest first).
#[must_use]
pub fn build_rows(buckets: &[ParentBucket], ctx: &RowContext<'_>) -> Vec<ProductRow> {
    let mut rows: Vec<ProductRow> = buckets.iter().map(|bucket| parent_row(bucket, ctx)).collect();
    sort_by_sales(&mut rows);
    rows
}

fn parent_row(bucket: &ParentBucket, ctx: &RowContext<'_>) -> ProductRow {
    let mut children: Vec<ProductRow> = bucket
        .children
        .iter()
        .map(|child| child_row(child, &bucket.parent_asin, ctx))
        .collect();
    sort_by_sales(&mut children);

    let totals = bucket.totals;
    // With children, ad spend and fees are the parent's own plus the
    // children's (which is what `totals` holds), and gross profit is derived
    // from them instead of summing the reported per-ASIN figures. Standalone
    // products keep the reported gross profit.
    let gross_profit = if bucket.is_expandable() {
        totals.sales - totals.fees - totals.ad_spend
    } else {
        totals.gross_profit
    };

    let mut row = derive_row(&bucket.parent_asin, None, &totals, gross_profit, ctx);
    row.currency_code = bucket.currency_code;
    row.is_expandable = bucket.is_expandable();
    row.children_count = children.len();
    row.children = children;
    row
}

fn child_row(child: &AggregatedAsin, parent: &Asin, ctx: &RowContext<'_>) -> ProductRow {
    let mut row = derive_row(
        &child.asin,
        Some(parent),
        &child.totals,
        child.totals.gross_profit,
        ctx,
    );
    row.currency_code = child.currency_code;
    row
}

fn derive_row(
    asin: &Asin,
    parent: Option<&Asin>,
    totals: &SalesTotals,
    gross_profit: Decimal,
    ctx: &RowContext<'_>,
) -> ProductRow {
    let cost_per_unit = ctx.costs.unit_cost(asin);
    let total_cost = cost_per_unit.saturating_mul(Decimal::from(totals.units));
    let net_profit = gross_profit - total_cost;
    let margin = profit_margin(net_profit, totals.sales);

    ProductRow {
        asin: asin.clone(),
        parent_asin: parent.cloned(),
        name: ctx.catalog.display_name(asin),
        sku: ctx.catalog.sku(asin),
        units: totals.units,
        sales: totals.sales,
        cost_per_unit,
        total_cost,
        ad_spend: totals.ad_spend,
        fees: totals.fees,
        amazon_fees: totals.amazon_fees,
        fba_fees: totals.fba_fees,
        storage_fees: totals.storage_fees,
        gross_profit,
        net_profit,
        refunds: totals.refunds,
        profit_margin: round_margin(margin),
        health_status: health_status(margin, totals.sales, ctx.thresholds),
        is_expandable: false,
        children: Vec::new(),
        children_count: 0,
        currency_code: None,
    }
}

fn sort_by_sales(rows: &mut [ProductRow]) {
    rows.sort_by(|a, b| b.sales.cmp(&a.sales).then_with(|| a.asin.cmp(&b.asin)));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profitability::group::group_by_parent;

    fn asin(s: &str) -> Asin {
        Asin::parse(s).unwrap()
    }

    fn member(asin_str: &str, parent: &str, totals: SalesTotals) -> AggregatedAsin {
        AggregatedAsin {
            asin: asin(asin_str),
            parent_asin: asin(parent),
            currency_code: None,
            totals,
        }
    }

    fn totals(sales: i64, gross: i64, units: i64) -> SalesTotals {
        SalesTotals {
            sales: Decimal::from(sales),
            gross_profit: Decimal::from(gross),
            units,
            ..SalesTotals::default()
        }
    }

    fn build(members: Vec<AggregatedAsin>, costs: &CostOfGoods) -> Vec<ProductRow> {
        let catalog = Catalog::new();
        let thresholds = HealthThresholds::default();
        let ctx = RowContext {
            costs,
            catalog: &catalog,
            thresholds: &thresholds,
        };
        build_rows(&group_by_parent(members), &ctx)
    }

    #[test]
    fn test_margin_is_zero_without_sales() {
        assert_eq!(profit_margin(Decimal::from(-10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(profit_margin(Decimal::from(5), Decimal::from(-1)), Decimal::ZERO);
        assert_eq!(profit_margin(Decimal::from(8), Decimal::from(100)), Decimal::from(8));
    }

    #[test]
    fn test_status_thresholds_at_sales_100() {
        let thresholds = HealthThresholds::default();
        let hundred = Decimal::from(100);
        let status = |net: i64| {
            let net = Decimal::from(net);
            health_status(profit_margin(net, hundred), hundred, &thresholds)
        };
        assert_eq!(status(-5), HealthStatus::Bad);
        assert_eq!(status(8), HealthStatus::Warn);
        assert_eq!(status(15), HealthStatus::Good);
    }

    #[test]
    fn test_margin_rounds_down_below_threshold() {
        assert_eq!(round_margin(Decimal::new(9996, 3)), Decimal::new(999, 2));
        assert_eq!(round_margin(Decimal::new(-1, 3)), Decimal::new(-1, 2));
        assert_eq!(round_margin(Decimal::from(10)), Decimal::from(10));

        let mut t = totals(10_000, 0, 1);
        t.gross_profit = Decimal::new(9996, 1);
        let rows = build(vec![member("W1", "W1", t)], &CostOfGoods::new());
        let row = rows.first().unwrap();
        assert_eq!(row.profit_margin, Decimal::new(999, 2));
        assert_eq!(row.health_status, HealthStatus::Warn);
    }

    #[test]
    fn test_zero_sales_row_is_good_and_zeroed() {
        let rows = build(vec![member("Z1", "Z1", totals(0, 0, 0))], &CostOfGoods::new());
        let row = rows.first().unwrap();
        assert_eq!(row.profit_margin, Decimal::ZERO);
        assert_eq!(row.net_profit, Decimal::ZERO);
        assert_eq!(row.total_cost, Decimal::ZERO);
        assert_eq!(row.health_status, HealthStatus::Good);
        assert_eq!(row.name, "Product Z1");
    }

    #[test]
    fn test_standalone_keeps_reported_gross_profit() {
        let mut t = totals(100, 30, 4);
        t.fees = Decimal::from(50);
        t.ad_spend = Decimal::from(10);
        let rows = build(vec![member("S1", "S1", t)], &CostOfGoods::new());
        let row = rows.first().unwrap();
        assert_eq!(row.gross_profit, Decimal::from(30));
        assert!(!row.is_expandable);
        assert_eq!(row.children_count, 0);
    }

    #[test]
    fn test_parent_gross_profit_recomputed_from_fees() {
        let mut own = totals(40, 25, 1);
        own.fees = Decimal::from(5);
        own.ad_spend = Decimal::from(2);
        own.amazon_fees = Decimal::from(3);
        let mut child = totals(60, 50, 2);
        child.fees = Decimal::from(10);
        child.ad_spend = Decimal::from(4);
        child.amazon_fees = Decimal::from(6);

        let rows = build(
            vec![member("P1", "P1", own), member("A1", "P1", child)],
            &CostOfGoods::new(),
        );
        let parent = rows.first().unwrap();
        assert_eq!(parent.sales, Decimal::from(100));
        assert_eq!(parent.fees, Decimal::from(15));
        assert_eq!(parent.ad_spend, Decimal::from(6));
        assert_eq!(parent.amazon_fees, Decimal::from(9));
        // 100 - 15 - 6, not the reported 25 + 50.
        assert_eq!(parent.gross_profit, Decimal::from(79));
        assert_eq!(parent.children_count, 1);
        assert!(parent.children.iter().all(|c| c.asin != parent.asin));
    }

    #[test]
    fn test_cost_of_goods_applied() {
        let mut costs = CostOfGoods::new();
        costs.set("A1", Decimal::from(2)).unwrap();
        let rows = build(
            vec![
                member("A1", "P1", totals(100, 20, 5)),
                member("A2", "P1", totals(50, 10, 2)),
            ],
            &costs,
        );
        let parent = rows.first().unwrap();
        let a1 = parent.children.first().unwrap();
        assert_eq!(a1.asin.as_str(), "A1");
        assert_eq!(a1.parent_asin.as_ref().map(Asin::as_str), Some("P1"));
        assert_eq!(a1.cost_per_unit, Decimal::from(2));
        assert_eq!(a1.total_cost, Decimal::from(10));
        assert_eq!(a1.net_profit, Decimal::from(10));
        assert_eq!(a1.profit_margin, Decimal::from(10));
        assert_eq!(a1.health_status, HealthStatus::Good);
    }

    #[test]
    fn test_rows_sorted_by_sales_descending() {
        let rows = build(
            vec![
                member("S1", "S1", totals(10, 5, 1)),
                member("S2", "S2", totals(30, 5, 1)),
                member("A1", "P1", totals(5, 1, 1)),
                member("A2", "P1", totals(15, 1, 1)),
            ],
            &CostOfGoods::new(),
        );
        let order: Vec<&str> = rows.iter().map(|r| r.asin.as_str()).collect();
        assert_eq!(order, ["S2", "P1", "S1"]);
        let children: Vec<&str> = rows
            .get(1)
            .unwrap()
            .children
            .iter()
            .map(|r| r.asin.as_str())
            .collect();
        assert_eq!(children, ["A2", "A1"]);
    }

    #[test]
    fn test_flatten_yields_parent_then_children() {
        let rows = build(
            vec![
                member("A1", "P1", totals(5, 1, 1)),
                member("A2", "P1", totals(15, 1, 1)),
            ],
            &CostOfGoods::new(),
        );
        let flat: Vec<&str> = rows
            .first()
            .unwrap()
            .flatten()
            .map(|r| r.asin.as_str())
            .collect();
        assert_eq!(flat, ["P1", "A2", "A1"]);
    }
}
