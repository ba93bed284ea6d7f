//! Product catalog metadata merged into report rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Asin;
use crate::lenient;

/// Catalog metadata for one ASIN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalogEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub asin: String,
    /// Listing title.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    /// Seller-facing item name; preferred over the title when present.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sku: Option<String>,
}

/// Catalog entries keyed by ASIN.
///
/// Serialized as a list of entries. Entries without a usable ASIN are
/// dropped; a later entry for the same ASIN replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog(BTreeMap<Asin, ProductCatalogEntry>);

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace an entry. Returns `false` if the entry's ASIN is invalid.
    pub fn insert(&mut self, entry: ProductCatalogEntry) -> bool {
        match Asin::parse(&entry.asin) {
            Ok(asin) => {
                self.0.insert(asin, entry);
                true
            }
            Err(_) => false,
        }
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, asin: &Asin) -> Option<&ProductCatalogEntry> {
        self.0.get(asin)
    }

    /// Display name: item name, then title, then `"Product {asin}"`.
    #[must_use]
    pub fn display_name(&self, asin: &Asin) -> String {
        self.get(asin)
            .and_then(|entry| {
                non_blank(entry.item_name.as_deref()).or_else(|| non_blank(entry.title.as_deref()))
            })
            .map_or_else(|| format!("Product {asin}"), str::to_owned)
    }

    /// Seller SKU, empty when unknown.
    #[must_use]
    pub fn sku(&self, asin: &Asin) -> String {
        self.get(asin)
            .and_then(|entry| non_blank(entry.sku.as_deref()))
            .unwrap_or_default()
            .to_owned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl FromIterator<ProductCatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = ProductCatalogEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            if !catalog.insert(entry) {
                tracing::debug!("Dropping catalog entry without a valid ASIN");
            }
        }
        catalog
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<ProductCatalogEntry>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asin(s: &str) -> Asin {
        Asin::parse(s).unwrap()
    }

    fn catalog() -> Catalog {
        serde_json::from_value(json!([
            {"asin": "A1", "itemName": "Cotton Tee - Red", "title": "Cotton Tee", "sku": "TEE-R"},
            {"asin": "A2", "title": "Cotton Tee - Blue"},
            {"asin": "A3", "itemName": "  ", "title": null},
            {"title": "orphan"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_name_fallback_order() {
        let catalog = catalog();
        assert_eq!(catalog.display_name(&asin("A1")), "Cotton Tee - Red");
        assert_eq!(catalog.display_name(&asin("A2")), "Cotton Tee - Blue");
        assert_eq!(catalog.display_name(&asin("A3")), "Product A3");
        assert_eq!(catalog.display_name(&asin("ZZ")), "Product ZZ");
    }

    #[test]
    fn test_sku_defaults_to_empty() {
        let catalog = catalog();
        assert_eq!(catalog.sku(&asin("A1")), "TEE-R");
        assert_eq!(catalog.sku(&asin("A2")), "");
    }

    #[test]
    fn test_entries_without_asin_dropped() {
        assert_eq!(catalog().len(), 3);
    }

    #[test]
    fn test_serializes_as_list() {
        let value = serde_json::to_value(catalog()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }
}
