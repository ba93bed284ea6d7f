//! Per-ASIN aggregation of daily sales records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Asin, CurrencyCode, SalesRecord, SalesTotals};

/// One child ASIN's totals across the filtered window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedAsin {
    pub asin: Asin,
    /// Parent ASIN; equal to `asin` for standalone products.
    pub parent_asin: Asin,
    /// First currency seen for this ASIN.
    pub currency_code: Option<CurrencyCode>,
    #[serde(flatten)]
    pub totals: SalesTotals,
}

impl AggregatedAsin {
    /// Whether this ASIN is its own parent.
    #[must_use]
    pub fn is_self_parented(&self) -> bool {
        self.asin == self.parent_asin
    }
}

struct Accumulator {
    aggregated: AggregatedAsin,
    explicit_parent: bool,
}

/// Sum records into one [`AggregatedAsin`] per distinct ASIN.
///
/// The parent is the first parent ASIN named by any of the ASIN's records;
/// records that name none do not claim it, and an ASIN whose records never
/// name a parent is its own parent. Records with no usable ASIN are skipped.
///
/// Output is ordered by ASIN. Sums use exact decimal arithmetic, so input
/// order never changes the totals.
#[must_use]
pub fn aggregate_by_asin<'a, I>(records: I) -> Vec<AggregatedAsin>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut by_asin: BTreeMap<Asin, Accumulator> = BTreeMap::new();
    let mut skipped = 0_usize;

    for record in records {
        let Ok(asin) = Asin::parse(&record.asin) else {
            skipped += 1;
            continue;
        };
        let named_parent = record
            .parent_asin
            .as_deref()
            .and_then(|p| Asin::parse(p).ok());

        let acc = by_asin.entry(asin).or_insert_with_key(|asin| Accumulator {
            aggregated: AggregatedAsin {
                asin: asin.clone(),
                parent_asin: asin.clone(),
                currency_code: None,
                totals: SalesTotals::default(),
            },
            explicit_parent: false,
        });

        if let (false, Some(parent)) = (acc.explicit_parent, named_parent) {
            acc.aggregated.parent_asin = parent;
            acc.explicit_parent = true;
        }
        if acc.aggregated.currency_code.is_none() {
            acc.aggregated.currency_code = record.currency_code;
        }
        acc.aggregated.totals.add_record(record);
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped sales records without a usable ASIN");
    }
    tracing::debug!(asins = by_asin.len(), "Aggregated sales by ASIN");

    by_asin.into_values().map(|acc| acc.aggregated).collect()
}
