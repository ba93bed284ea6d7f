//! Normalization of upstream sales payloads into [`SalesRecord`]s.
//!
//! The backend has served sales data in three shapes over time. Each one is
//! decoded here, so the pipeline only ever sees canonical records.

pub mod legacy;
pub mod phased;

use serde::Deserialize;

use crate::types::SalesRecord;

pub use legacy::{LegacyPayload, LegacyRow};
pub use phased::{PhasedMetrics, PhasedPage, PhasedProduct, merge_pages};

/// Any accepted sales payload.
///
/// Variants are tried in order: a paged product object, the legacy
/// `profitabilityData` object, then a bare array of ASIN-wise records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SalesPayload {
    Phased(PhasedPage),
    Legacy(LegacyPayload),
    AsinWise(Vec<SalesRecord>),
}

impl SalesPayload {
    /// Decode a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or matches none of the
    /// accepted shapes.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Short name of the payload shape, for logging.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Phased(_) => "phased",
            Self::Legacy(_) => "legacy",
            Self::AsinWise(_) => "asin_wise",
        }
    }

    /// Canonical records in payload order.
    #[must_use]
    pub fn into_records(self) -> Vec<SalesRecord> {
        match self {
            Self::Phased(page) => page.into_records(),
            Self::Legacy(payload) => payload.into_records(),
            Self::AsinWise(records) => records,
        }
    }
}

/// Combine several payloads into one record list.
///
/// Paged payloads are merged with [`merge_pages`] and come first; the other
/// payloads follow in the order given.
#[must_use]
pub fn collect_records<I>(payloads: I) -> Vec<SalesRecord>
where
    I: IntoIterator<Item = SalesPayload>,
{
    let mut pages = Vec::new();
    let mut rest = Vec::new();
    for payload in payloads {
        match payload {
            SalesPayload::Phased(page) => pages.push(page),
            other => rest.extend(other.into_records()),
        }
    }

    let mut records = if pages.is_empty() {
        Vec::new()
    } else {
        merge_pages(pages)
    };
    records.append(&mut rest);
    records
}
