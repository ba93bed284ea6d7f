//! Grouping of per-ASIN totals under their parent ASIN.

use std::collections::BTreeMap;

use crate::types::{Asin, CurrencyCode, SalesTotals};

use super::aggregate::AggregatedAsin;

/// All ASINs sharing one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentBucket {
    pub parent_asin: Asin,
    /// The parent ASIN's own sales, when it sells directly. Counted in
    /// `totals` but never listed as a child.
    pub own: Option<AggregatedAsin>,
    /// Variations distinct from the parent, ordered by ASIN.
    pub children: Vec<AggregatedAsin>,
    /// Sum over `own` and every child.
    pub totals: SalesTotals,
    /// First currency found among the members.
    pub currency_code: Option<CurrencyCode>,
}

impl ParentBucket {
    fn new(parent_asin: Asin) -> Self {
        Self {
            parent_asin,
            own: None,
            children: Vec::new(),
            totals: SalesTotals::default(),
            currency_code: None,
        }
    }

    /// Whether the row gets a disclosure control, i.e. has visible children.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        !self.children.is_empty()
    }

    /// Totals of the parent ASIN's own sales (zero when it has none).
    #[must_use]
    pub fn own_totals(&self) -> SalesTotals {
        self.own.as_ref().map(|own| own.totals).unwrap_or_default()
    }
}

/// Bucket aggregated ASINs by parent.
///
/// Buckets come out ordered by parent ASIN and children by ASIN, so the
/// result does not depend on input order.
#[must_use]
pub fn group_by_parent(aggregated: Vec<AggregatedAsin>) -> Vec<ParentBucket> {
    let mut buckets: BTreeMap<Asin, ParentBucket> = BTreeMap::new();

    for member in aggregated {
        let bucket = buckets
            .entry(member.parent_asin.clone())
            .or_insert_with_key(|parent| ParentBucket::new(parent.clone()));

        bucket.totals += &member.totals;

        if member.is_self_parented() {
            match bucket.own.as_mut() {
                // Only reachable when the caller passes duplicate ASINs.
                Some(own) => own.totals += &member.totals,
                None => bucket.own = Some(member),
            }
        } else {
            bucket.children.push(member);
        }
    }

    let mut out: Vec<ParentBucket> = buckets.into_values().collect();
    for bucket in &mut out {
        bucket.children.sort_by(|a, b| a.asin.cmp(&b.asin));
        bucket.currency_code = bucket
            .own
            .iter()
            .chain(bucket.children.iter())
            .find_map(|member| member.currency_code);
    }

    tracing::debug!(buckets = out.len(), "Grouped ASINs by parent");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn member(asin: &str, parent: &str, sales: i64) -> AggregatedAsin {
        AggregatedAsin {
            asin: Asin::parse(asin).unwrap(),
            parent_asin: Asin::parse(parent).unwrap(),
            currency_code: None,
            totals: SalesTotals {
                sales: Decimal::from(sales),
                units: 1,
                ..SalesTotals::default()
            },
        }
    }

    #[test]
    fn test_children_grouped_under_parent() {
        let buckets = group_by_parent(vec![
            member("A2", "P1", 50),
            member("A1", "P1", 100),
            member("S1", "S1", 10),
        ]);

        assert_eq!(buckets.len(), 2);
        let p1 = buckets.first().unwrap();
        assert_eq!(p1.parent_asin.as_str(), "P1");
        assert!(p1.is_expandable());
        assert!(p1.own.is_none());
        let children: Vec<&str> = p1.children.iter().map(|c| c.asin.as_str()).collect();
        assert_eq!(children, ["A1", "A2"]);
        assert_eq!(p1.totals.sales, Decimal::from(150));
        assert_eq!(p1.totals.units, 2);
    }

    #[test]
    fn test_parent_own_sales_counted_but_not_listed() {
        let buckets = group_by_parent(vec![
            member("P1", "P1", 30),
            member("A1", "P1", 100),
        ]);
        let p1 = buckets.first().unwrap();
        assert_eq!(p1.children.len(), 1);
        assert_eq!(p1.own_totals().sales, Decimal::from(30));
        assert_eq!(p1.totals.sales, Decimal::from(130));
    }

    #[test]
    fn test_standalone_is_not_expandable() {
        let buckets = group_by_parent(vec![member("S1", "S1", 10)]);
        let s1 = buckets.first().unwrap();
        assert!(!s1.is_expandable());
        assert_eq!(s1.totals, s1.own_totals());
    }

    #[test]
    fn test_input_order_irrelevant() {
        let forward = vec![
            member("A1", "P1", 1),
            member("A2", "P1", 2),
            member("P1", "P1", 3),
            member("B1", "P2", 4),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(group_by_parent(forward), group_by_parent(backward));
    }
}
