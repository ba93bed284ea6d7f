//! Improvement notes for rows that need attention.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Asin, HealthStatus, Money};

use super::HealthThresholds;
use super::rows::ProductRow;

/// Advice for a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub asin: Asin,
    pub parent_asin: Option<Asin>,
    pub name: String,
    pub health_status: HealthStatus,
    pub profit_margin: Decimal,
    pub messages: Vec<String>,
}

/// Notes for one row. Empty for `good` rows.
///
/// The row's health status decides which notes apply, so a margin that only
/// displays as the threshold still gets the low-margin notes.
#[must_use]
pub fn suggest(row: &ProductRow, thresholds: &HealthThresholds) -> Vec<String> {
    match row.health_status {
        HealthStatus::Good => Vec::new(),
        HealthStatus::Bad => loss_notes(row),
        HealthStatus::Warn => low_margin_notes(row, thresholds),
    }
}

fn loss_notes(row: &ProductRow) -> Vec<String> {
    let loss = Money::new(-row.net_profit, row.currency_code.unwrap_or_default());
    vec![
        format!("This product is incurring a loss of {loss}."),
        "Consider increasing the selling price.".to_owned(),
        "Reduce advertising spend or pause unprofitable campaigns.".to_owned(),
        "Review referral, FBA and storage fees for this product.".to_owned(),
    ]
}

fn low_margin_notes(row: &ProductRow, thresholds: &HealthThresholds) -> Vec<String> {
    let mut messages = vec![
        format!("Very low margin ({:.2}%).", row.profit_margin),
        "Consider increasing the price or renegotiating the product cost.".to_owned(),
    ];
    if let Some(ratio) = cost_ratio(row).filter(|ratio| *ratio > thresholds.supplier_cost_ratio) {
        messages.push(format!(
            "Product cost is {ratio:.0}% of sales; negotiate better terms with your supplier."
        ));
    }
    messages
}

/// Total cost as a percentage of sales, `None` without positive sales.
fn cost_ratio(row: &ProductRow) -> Option<Decimal> {
    if row.sales <= Decimal::ZERO {
        return None;
    }
    row.total_cost
        .checked_div(row.sales)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// Suggestions for every row and child row that needs attention, in table
/// order.
#[must_use]
pub fn suggestions_for(rows: &[ProductRow], thresholds: &HealthThresholds) -> Vec<Suggestion> {
    rows.iter()
        .flat_map(ProductRow::flatten)
        .filter_map(|row| {
            let messages = suggest(row, thresholds);
            (!messages.is_empty()).then(|| Suggestion {
                asin: row.asin.clone(),
                parent_asin: row.parent_asin.clone(),
                name: row.name.clone(),
                health_status: row.health_status,
                profit_margin: row.profit_margin,
                messages,
            })
        })
        .collect()
}
