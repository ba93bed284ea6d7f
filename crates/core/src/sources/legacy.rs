//! Flat per-ASIN totals from the older profitability endpoint.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::lenient;
use crate::types::{CurrencyCode, SalesRecord};

/// `{ "profitabilityData": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    pub profitability_data: Vec<LegacyRow>,
}

/// Totals for one ASIN over whatever window the endpoint chose. Rows carry
/// no date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRow {
    #[serde(default, deserialize_with = "lenient::string")]
    pub asin: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub parent_asin: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub sales: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub gross_profit: Decimal,
    #[serde(default, deserialize_with = "lenient::units")]
    pub units_sold: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub ad_spend: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amazon_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub fba_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub storage_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub refunds: Decimal,
    #[serde(default, deserialize_with = "lenient::opt_currency")]
    pub currency_code: Option<CurrencyCode>,
}

impl From<LegacyRow> for SalesRecord {
    fn from(row: LegacyRow) -> Self {
        Self {
            asin: row.asin,
            parent_asin: row.parent_asin,
            date: None,
            sales_amount: row.sales,
            gross_profit_amount: row.gross_profit,
            units_sold: row.units_sold,
            ppc_spend_amount: row.ad_spend,
            fba_fee_amount: row.fba_fees,
            storage_fee_amount: row.storage_fees,
            total_fee_amount: row.fees,
            amazon_fee_amount: row.amazon_fees,
            refund_amount: row.refunds,
            currency_code: row.currency_code,
        }
    }
}

impl LegacyPayload {
    #[must_use]
    pub fn into_records(self) -> Vec<SalesRecord> {
        self.profitability_data
            .into_iter()
            .map(SalesRecord::from)
            .collect()
    }
}
