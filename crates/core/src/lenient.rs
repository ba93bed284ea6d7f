//! Lenient decoders for upstream marketplace payloads.
//!
//! Amounts arrive as numbers, numeric strings, `null`, or not at all, and
//! occasionally as something else entirely. Anything that is not a usable
//! number decodes to zero, so a bad cell never poisons a sum.
//!
//! These decoders rely on `deserialize_any` and are meant for self-describing
//! formats (JSON, YAML).

use core::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::types::{CurrencyCode, parse_record_date};

/// Parse a decimal from free-form text.
///
/// Accepts plain and scientific notation, and ignores `$` signs and thousands
/// separators (`"1,234.50"`).
#[must_use]
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .or_else(|| Decimal::from_scientific(&cleaned).ok())
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        // NaN and infinities have no decimal representation.
        Ok(Decimal::try_from(v).unwrap_or(Decimal::ZERO))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Ok(parse_decimal(v).unwrap_or(Decimal::ZERO))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Decimal, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Decimal, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Decimal::ZERO)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Decimal, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Decimal::ZERO)
    }
}

/// Decode a monetary amount, coercing anything unusable to zero.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor)
}

/// Decode a unit count. Fractional values round to the nearest whole unit.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserializer.deserialize_any(DecimalVisitor)?;
    Ok(value.round().to_i64().unwrap_or(0))
}

/// A decimal that decodes leniently, for use as a collection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Amount(pub Decimal);

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decimal(deserializer).map(Self)
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number, or null")
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

/// Decode an optional identifier or label. Blank strings become `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TextVisitor)
}

/// Decode a required identifier, falling back to an empty string.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Decode a record timestamp. Unparseable values become `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.and_then(|s| parse_record_date(&s)))
}

/// Decode a currency code. Unknown codes become `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn opt_currency<'de, D>(deserializer: D) -> Result<Option<CurrencyCode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "decimal")]
        amount: Decimal,
        #[serde(default, deserialize_with = "units")]
        units: i64,
        #[serde(default, deserialize_with = "opt_string")]
        label: Option<String>,
    }

    fn fields(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(fields(json!({"amount": 12.5})).amount, Decimal::new(125, 1));
        assert_eq!(fields(json!({"amount": 7})).amount, Decimal::from(7));
        assert_eq!(fields(json!({"amount": "19.99"})).amount, Decimal::new(1999, 2));
        assert_eq!(
            fields(json!({"amount": "$1,234.50"})).amount,
            Decimal::new(123_450, 2)
        );
    }

    #[test]
    fn test_garbage_coerces_to_zero() {
        for value in [
            json!(null),
            json!("n/a"),
            json!(""),
            json!(true),
            json!([1, 2]),
            json!({"nested": 1}),
        ] {
            let parsed = fields(json!({ "amount": value.clone(), "units": value }));
            assert_eq!(parsed.amount, Decimal::ZERO);
            assert_eq!(parsed.units, 0);
        }
        assert_eq!(fields(json!({})).amount, Decimal::ZERO);
    }

    #[test]
    fn test_units_round_fractions() {
        assert_eq!(fields(json!({"units": 2.6})).units, 3);
        assert_eq!(fields(json!({"units": "4"})).units, 4);
    }

    #[test]
    fn test_blank_labels_are_none() {
        assert_eq!(fields(json!({"label": "   "})).label, None);
        assert_eq!(fields(json!({"label": " B0ABC "})).label.as_deref(), Some("B0ABC"));
        assert_eq!(fields(json!({"label": 42})).label.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("1e2"), Some(Decimal::from(100)));
        assert_eq!(parse_decimal("abc"), None);
    }
}
