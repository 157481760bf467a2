// src/data/mod.rs

pub mod date_parser;
pub mod load;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::filter::DateRange;

pub use load::{load_table, read_table};

/// One hourly rental observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rental {
    pub date: NaiveDate,
    /// Year label as it appears in the source file.
    pub year: String,
    /// Month label as it appears in the source file.
    pub month: String,
    pub hour: u8,
    pub weekday: u8,
    pub holiday: u8,
    pub season: String,
    pub weather: String,
    pub temperature: f64,
    pub humidity: f64,
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

impl Rental {
    /// Calendar year + month of this row's date.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    pub fn is_weekday(&self) -> bool {
        self.weekday == 1
    }

    /// Holiday, or any day that is not a weekday.
    pub fn is_day_off(&self) -> bool {
        self.holiday == 1 || self.weekday == 0
    }
}

/// Numeric columns that recaps can reduce over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Total,
    Casual,
    Registered,
    Temperature,
    Humidity,
}

impl Column {
    pub fn value(self, row: &Rental) -> f64 {
        match self {
            Column::Total => row.total as f64,
            Column::Casual => row.casual as f64,
            Column::Registered => row.registered as f64,
            Column::Temperature => row.temperature,
            Column::Humidity => row.humidity,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::Total => "total",
            Column::Casual => "casual",
            Column::Registered => "registered",
            Column::Temperature => "temperature",
            Column::Humidity => "hum",
        }
    }
}

/// Synthetic year-month grouping key. Orders chronologically and
/// displays as `MM YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {:04}", self.month, self.year)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The base table: every row of the dataset, sorted ascending by date.
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Rental>,
}

impl Table {
    /// Build a table, stable-sorting rows by date so rows sharing a date
    /// keep their input order.
    pub fn new(mut rows: Vec<Rental>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[Rental] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// `[min_date, max_date]`, or `None` for an empty table.
    pub fn full_range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.min_date()?, self.max_date()?))
    }
}
