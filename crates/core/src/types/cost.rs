//! Per-ASIN cost of goods entered by the seller.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Asin, AsinError};
use crate::lenient::Amount;

/// Errors that can occur when entering a unit cost.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CostError {
    /// The ASIN is not valid.
    #[error("invalid ASIN: {0}")]
    InvalidAsin(#[from] AsinError),
    /// Unit costs cannot be negative.
    #[error("unit cost for {asin} cannot be negative (got {unit_cost})")]
    Negative {
        /// ASIN the cost was entered for.
        asin: Asin,
        /// Rejected value.
        unit_cost: Decimal,
    },
}

/// Unit cost per ASIN.
///
/// A missing entry and an entry of zero both mean "not yet entered"; the
/// pipeline treats them as a zero cost.
///
/// Serializes as a flat `{asin: unit_cost}` map. When deserializing, entries
/// with an invalid ASIN or a negative cost are skipped with a warning so one
/// bad line in a hand-edited file does not discard the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CostOfGoods(BTreeMap<Asin, Decimal>);

impl CostOfGoods {
    /// Create an empty cost table.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Enter or replace the unit cost for an ASIN.
    ///
    /// Returns the previous cost, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the ASIN is invalid or the cost is negative.
    pub fn set(&mut self, asin: &str, unit_cost: Decimal) -> Result<Option<Decimal>, CostError> {
        let asin = Asin::parse(asin)?;
        if unit_cost.is_sign_negative() && !unit_cost.is_zero() {
            return Err(CostError::Negative { asin, unit_cost });
        }
        Ok(self.0.insert(asin, unit_cost.normalize()))
    }

    /// Remove the cost entry for an ASIN, returning it.
    pub fn remove(&mut self, asin: &str) -> Option<Decimal> {
        let asin = Asin::parse(asin).ok()?;
        self.0.remove(&asin)
    }

    /// Unit cost for an ASIN, zero when not entered.
    #[must_use]
    pub fn unit_cost(&self, asin: &Asin) -> Decimal {
        self.0.get(asin).copied().unwrap_or(Decimal::ZERO)
    }

    /// Whether a non-zero cost has been entered for the ASIN.
    #[must_use]
    pub fn is_entered(&self, asin: &Asin) -> bool {
        self.0.get(asin).is_some_and(|cost| !cost.is_zero())
    }

    /// Iterate over entries in ASIN order.
    pub fn iter(&self) -> impl Iterator<Item = (&Asin, &Decimal)> {
        self.0.iter()
    }

    /// Number of entries, including zero-cost ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CostOfGoods {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Amount>::deserialize(deserializer)?;
        let mut costs = Self::new();
        for (asin, Amount(unit_cost)) in raw {
            if let Err(e) = costs.set(&asin, unit_cost) {
                tracing::warn!(asin = %asin, error = %e, "Skipping cost entry");
            }
        }
        Ok(costs)
    }
}
