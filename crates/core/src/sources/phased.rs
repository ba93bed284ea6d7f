//! Paged product payloads with nested metrics.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::lenient;
use crate::types::{CurrencyCode, SalesRecord};

/// One server page: `{ "products": [...], "page": n, "totalPages": n }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasedPage {
    pub products: Vec<PhasedProduct>,
    /// 1-based page number; 0 when the payload does not say.
    #[serde(default, deserialize_with = "lenient::units")]
    pub page: i64,
    #[serde(default, deserialize_with = "lenient::units")]
    pub total_pages: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasedProduct {
    #[serde(default, deserialize_with = "lenient::string")]
    pub asin: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub parent_asin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::opt_currency")]
    pub currency_code: Option<CurrencyCode>,
    #[serde(default)]
    pub metrics: Option<PhasedMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasedMetrics {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub sales: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub gross_profit: Decimal,
    #[serde(default, deserialize_with = "lenient::units")]
    pub units: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub ppc_spend: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub fba_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub storage_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amazon_fees: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub refunds: Decimal,
}

impl From<PhasedProduct> for SalesRecord {
    fn from(product: PhasedProduct) -> Self {
        let metrics = product.metrics.unwrap_or_default();
        Self {
            asin: product.asin,
            parent_asin: product.parent_asin,
            date: product.date,
            sales_amount: metrics.sales,
            gross_profit_amount: metrics.gross_profit,
            units_sold: metrics.units,
            ppc_spend_amount: metrics.ppc_spend,
            fba_fee_amount: metrics.fba_fees,
            storage_fee_amount: metrics.storage_fees,
            total_fee_amount: metrics.total_fees,
            amazon_fee_amount: metrics.amazon_fees,
            refund_amount: metrics.refunds,
            currency_code: product.currency_code,
        }
    }
}

impl PhasedPage {
    #[must_use]
    pub fn into_records(self) -> Vec<SalesRecord> {
        self.products.into_iter().map(SalesRecord::from).collect()
    }
}

/// Concatenate pages in page order.
///
/// A page number seen twice keeps its first copy. Missing pages are logged
/// but do not fail the merge.
#[must_use]
pub fn merge_pages<I>(pages: I) -> Vec<SalesRecord>
where
    I: IntoIterator<Item = PhasedPage>,
{
    let mut pages: Vec<PhasedPage> = pages.into_iter().collect();
    // Stable, so duplicates keep their arrival order.
    pages.sort_by_key(|page| page.page);

    let expected = pages.iter().map(|page| page.total_pages).max().unwrap_or(0);
    let mut records = Vec::new();
    let mut last_page = None;
    let mut received = 0_i64;

    for page in pages {
        if page.page > 0 && last_page == Some(page.page) {
            tracing::warn!(page = page.page, "Ignoring duplicate sales page");
            continue;
        }
        last_page = Some(page.page);
        received += 1;
        records.extend(page.into_records());
    }

    if received < expected {
        tracing::warn!(received, expected, "Sales pages missing from merge");
    }
    tracing::debug!(records = records.len(), pages = received, "Merged sales pages");
    records
}
