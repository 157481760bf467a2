use chrono::NaiveDate;
use serde::Serialize;

use crate::data::Rental;

/// Inclusive `[start, end]` calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range with `start > end` selects nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Rows of a date-sorted slice whose date lies inside `range`.
///
/// Because the input is sorted the match is one contiguous run, found by
/// binary search. An inverted or disjoint range yields an empty slice.
pub fn filter<'a>(rows: &'a [Rental], range: &DateRange) -> &'a [Rental] {
    if range.is_empty() {
        return &[];
    }
    let lo = rows.partition_point(|r| r.date < range.start);
    let hi = rows.partition_point(|r| r.date <= range.end);
    if lo >= hi {
        &[]
    } else {
        &rows[lo..hi]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_rows::{date, rental};
    use crate::data::Table;

    fn table() -> Table {
        Table::new(vec![
            rental("2024-01-01", 0, 4, 6),
            rental("2024-01-01", 1, 5, 5),
            rental("2024-01-02", 0, 10, 10),
            rental("2024-01-04", 0, 1, 2),
        ])
    }

    #[test]
    fn test_filter_is_inclusive_and_ordered() {
        let t = table();
        let got = filter(t.rows(), &DateRange::new(date("2024-01-01"), date("2024-01-02")));
        assert_eq!(got, &t.rows()[0..3]);
    }

    #[test]
    fn test_full_range_returns_whole_table() {
        let t = table();
        let range = t.full_range().unwrap();
        assert_eq!(filter(t.rows(), &range), t.rows());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let t = table();
        let range = DateRange::new(date("2024-01-02"), date("2024-01-10"));
        let once = filter(t.rows(), &range);
        let twice = filter(once, &range);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_gap_and_wide_ranges() {
        let t = table();
        // 2024-01-03 has no rows
        assert!(filter(t.rows(), &DateRange::new(date("2024-01-03"), date("2024-01-03"))).is_empty());
        // wider than the data clamps to what exists
        let wide = DateRange::new(date("2023-01-01"), date("2025-01-01"));
        assert_eq!(filter(t.rows(), &wide), t.rows());
    }

    #[test]
    fn test_inverted_and_disjoint_ranges_are_empty() {
        let t = table();
        let inverted = DateRange::new(date("2024-01-02"), date("2024-01-01"));
        assert!(inverted.is_empty());
        assert!(filter(t.rows(), &inverted).is_empty());

        let before = DateRange::new(date("2020-01-01"), date("2020-12-31"));
        let after = DateRange::new(date("2030-01-01"), date("2030-12-31"));
        assert!(filter(t.rows(), &before).is_empty());
        assert!(filter(t.rows(), &after).is_empty());
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(date("2024-01-01"), date("2024-01-31"));
        assert!(range.contains(date("2024-01-01")));
        assert!(range.contains(date("2024-01-31")));
        assert!(!range.contains(date("2024-02-01")));
    }
}
