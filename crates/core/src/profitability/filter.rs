//! Date-range filtering of raw sales records.

use crate::types::{DateRange, SalesRecord};

/// Keep the records that fall inside `range`.
///
/// Undated records are always kept. With no range every record is kept, in
/// input order.
#[must_use]
pub fn filter_by_date<'a>(
    records: &'a [SalesRecord],
    range: Option<&DateRange>,
) -> Vec<&'a SalesRecord> {
    let Some(range) = range else {
        return records.iter().collect();
    };

    let kept: Vec<&SalesRecord> = records
        .iter()
        .filter(|record| record.date.is_none_or(|at| range.contains(at)))
        .collect();

    tracing::debug!(
        total = records.len(),
        kept = kept.len(),
        range = %range,
        "Filtered sales records by date"
    );
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::parse_record_date;

    fn record(asin: &str, date: Option<&str>) -> SalesRecord {
        SalesRecord {
            asin: asin.to_owned(),
            date: date.and_then(parse_record_date),
            ..SalesRecord::default()
        }
    }

    fn asins(records: &[&SalesRecord]) -> Vec<String> {
        records.iter().map(|r| r.asin.clone()).collect()
    }

    #[test]
    fn test_no_range_returns_everything() {
        let records = vec![record("A1", Some("2020-01-01")), record("A2", None)];
        assert_eq!(asins(&filter_by_date(&records, None)), ["A1", "A2"]);
    }

    #[test]
    fn test_end_of_day_boundary() {
        let records = vec![
            record("inside", Some("2024-11-28T23:59:59")),
            record("outside", Some("2024-11-29T00:00:01")),
            record("first", Some("2024-11-01T00:00:00")),
            record("before", Some("2024-10-31T23:59:59")),
        ];
        let range = DateRange::parse("2024-11-01", "2024-11-28").unwrap();
        assert_eq!(
            asins(&filter_by_date(&records, Some(&range))),
            ["inside", "first"]
        );
    }

    #[test]
    fn test_undated_records_always_kept() {
        let records = vec![record("undated", None), record("old", Some("2019-06-01"))];
        let range = DateRange::parse("2024-11-01", "2024-11-28").unwrap();
        assert_eq!(asins(&filter_by_date(&records, Some(&range))), ["undated"]);
    }

    #[test]
    fn test_empty_input() {
        let range = DateRange::parse("2024-11-01", "2024-11-28").unwrap();
        assert!(filter_by_date(&[], Some(&range)).is_empty());
    }
}
