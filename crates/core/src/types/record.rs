//! Canonical per-day sales record and running totals.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyCode;
use crate::lenient;

/// One ASIN's sales for one day, as reported by the backend.
///
/// This is the only shape the aggregation pipeline reads. Upstream payloads
/// in other shapes go through [`crate::sources`] first. Every numeric field
/// decodes leniently: missing or malformed values become zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Child ASIN the sales belong to.
    #[serde(default, deserialize_with = "lenient::string")]
    pub asin: String,
    /// Parent ASIN. Absent or blank means the ASIN is its own parent.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub parent_asin: Option<String>,
    /// Local calendar timestamp of the sales day. Undated records always
    /// pass the date filter.
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub date: Option<NaiveDateTime>,
    /// Ordered product sales.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub sales_amount: Decimal,
    /// Gross profit as computed by the backend (sales less fees and ad spend).
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub gross_profit_amount: Decimal,
    /// Units ordered.
    #[serde(default, deserialize_with = "lenient::units")]
    pub units_sold: i64,
    /// Sponsored-products advertising spend.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub ppc_spend_amount: Decimal,
    /// Fulfilment-by-Amazon fees.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub fba_fee_amount: Decimal,
    /// Warehouse storage fees.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub storage_fee_amount: Decimal,
    /// All fees combined.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_fee_amount: Decimal,
    /// Referral and other marketplace fees.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amazon_fee_amount: Decimal,
    /// Refunded amount.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub refund_amount: Decimal,
    /// Settlement currency, when known.
    #[serde(default, deserialize_with = "lenient::opt_currency")]
    pub currency_code: Option<CurrencyCode>,
}

impl SalesRecord {
    /// The record's parent ASIN text, falling back to its own ASIN.
    #[must_use]
    pub fn effective_parent(&self) -> &str {
        self.parent_asin
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(self.asin.as_str())
    }
}

/// Summed financial fields for one or more sales records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub sales: Decimal,
    pub gross_profit: Decimal,
    pub units: i64,
    pub ad_spend: Decimal,
    pub fba_fees: Decimal,
    pub storage_fees: Decimal,
    pub fees: Decimal,
    pub amazon_fees: Decimal,
    pub refunds: Decimal,
}

impl SalesTotals {
    /// Add one record's amounts.
    pub fn add_record(&mut self, record: &SalesRecord) {
        self.sales += record.sales_amount;
        self.gross_profit += record.gross_profit_amount;
        self.units = self.units.saturating_add(record.units_sold);
        self.ad_spend += record.ppc_spend_amount;
        self.fba_fees += record.fba_fee_amount;
        self.storage_fees += record.storage_fee_amount;
        self.fees += record.total_fee_amount;
        self.amazon_fees += record.amazon_fee_amount;
        self.refunds += record.refund_amount;
    }
}

impl std::ops::AddAssign<&Self> for SalesTotals {
    fn add_assign(&mut self, other: &Self) {
        self.sales += other.sales;
        self.gross_profit += other.gross_profit;
        self.units = self.units.saturating_add(other.units);
        self.ad_spend += other.ad_spend;
        self.fba_fees += other.fba_fees;
        self.storage_fees += other.storage_fees;
        self.fees += other.fees;
        self.amazon_fees += other.amazon_fees;
        self.refunds += other.refunds;
    }
}

impl<'a> std::iter::Sum<&'a Self> for SalesTotals {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, totals| {
            acc += totals;
            acc
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let record: SalesRecord = serde_json::from_value(json!({
            "asin": "A1",
            "parentAsin": "P1",
            "date": "2024-11-28",
            "salesAmount": 100.5,
            "grossProfitAmount": "20.25",
            "unitsSold": 5,
            "ppcSpendAmount": 12,
            "fbaFeeAmount": 3.1,
            "storageFeeAmount": null,
            "totalFeeAmount": 15,
            "amazonFeeAmount": 11.9,
            "refundAmount": 0,
            "currencyCode": "usd"
        }))
        .unwrap();

        assert_eq!(record.asin, "A1");
        assert_eq!(record.effective_parent(), "P1");
        assert_eq!(record.sales_amount, Decimal::new(1005, 1));
        assert_eq!(record.gross_profit_amount, Decimal::new(2025, 2));
        assert_eq!(record.units_sold, 5);
        assert_eq!(record.storage_fee_amount, Decimal::ZERO);
        assert_eq!(record.currency_code, Some(CurrencyCode::USD));
        assert_eq!(record.date.unwrap().to_string(), "2024-11-28 00:00:00");
    }

    #[test]
    fn test_missing_fields_default() {
        let record: SalesRecord = serde_json::from_value(json!({"asin": "A1"})).unwrap();
        assert_eq!(record.effective_parent(), "A1");
        assert!(record.date.is_none());
        assert_eq!(record.sales_amount, Decimal::ZERO);
        assert_eq!(record.units_sold, 0);
    }

    #[test]
    fn test_blank_parent_falls_back_to_self() {
        let record = SalesRecord {
            asin: "A1".to_owned(),
            parent_asin: Some("  ".to_owned()),
            ..SalesRecord::default()
        };
        assert_eq!(record.effective_parent(), "A1");
    }

    #[test]
    fn test_unparseable_date_is_undated() {
        let record: SalesRecord =
            serde_json::from_value(json!({"asin": "A1", "date": "yesterday"})).unwrap();
        assert!(record.date.is_none());
    }

    #[test]
    fn test_totals_sum() {
        let a = SalesRecord {
            asin: "A1".to_owned(),
            sales_amount: Decimal::from(100),
            units_sold: 5,
            total_fee_amount: Decimal::from(15),
            ..SalesRecord::default()
        };
        let b = SalesRecord {
            asin: "A2".to_owned(),
            sales_amount: Decimal::from(50),
            units_sold: 2,
            total_fee_amount: Decimal::from(7),
            ..SalesRecord::default()
        };
        let mut first = SalesTotals::default();
        first.add_record(&a);
        let mut second = SalesTotals::default();
        second.add_record(&b);

        let total: SalesTotals = [first, second].iter().sum();
        assert_eq!(total.sales, Decimal::from(150));
        assert_eq!(total.units, 7);
        assert_eq!(total.fees, Decimal::from(22));
    }
}
