//! Group-by-and-reduce over filtered rentals.
//!
//! Every recap partitions its input completely: each row lands in exactly
//! one group and groups with no rows are never emitted. Groups come out in
//! ascending key order.

pub mod peak;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::{Column, Rental, YearMonth};

pub use peak::{highlight_max, peak};

/// How a group's values are folded into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Sum,
    Mean,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<K, V = f64> {
    pub key: K,
    pub value: V,
}

/// Output of one grouping: one `(key, value)` pair per observed key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecapTable<K, V = f64> {
    groups: Vec<Group<K, V>>,
}

impl<K, V> RecapTable<K, V> {
    /// Wrap already-reduced `(key, value)` pairs, kept in the given order.
    pub fn from_groups(groups: Vec<(K, V)>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(key, value)| Group { key, value })
                .collect(),
        }
    }

    pub fn groups(&self) -> &[Group<K, V>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group<K, V>> {
        self.groups.iter()
    }

    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: PartialEq,
    {
        self.groups.iter().find(|g| &g.key == key).map(|g| &g.value)
    }

    pub fn map_values<W>(self, f: impl Fn(V) -> W) -> RecapTable<K, W> {
        RecapTable {
            groups: self
                .groups
                .into_iter()
                .map(|g| Group {
                    key: g.key,
                    value: f(g.value),
                })
                .collect(),
        }
    }
}

impl<K> RecapTable<K> {
    /// Sum of every group's value.
    pub fn value_sum(&self) -> f64 {
        self.groups.iter().map(|g| g.value).sum()
    }
}

impl<K, V> Default for RecapTable<K, V> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<'a, K, V> IntoIterator for &'a RecapTable<K, V> {
    type Item = &'a Group<K, V>;
    type IntoIter = std::slice::Iter<'a, Group<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group `rows` by `key` and reduce `N` values per row in one pass.
pub fn recap_columns<'a, I, K, const N: usize>(
    rows: I,
    key: impl Fn(&Rental) -> K,
    values: impl Fn(&Rental) -> [f64; N],
    reduction: Reduction,
) -> RecapTable<K, [f64; N]>
where
    I: IntoIterator<Item = &'a Rental>,
    K: Ord,
{
    let mut acc: BTreeMap<K, ([f64; N], u64)> = BTreeMap::new();
    for row in rows {
        let (sums, n) = acc.entry(key(row)).or_insert(([0.0; N], 0));
        for (sum, v) in sums.iter_mut().zip(values(row)) {
            *sum += v;
        }
        *n += 1;
    }

    let groups = acc
        .into_iter()
        .filter_map(|(key, (sums, n))| {
            let value = match reduction {
                Reduction::Sum => sums,
                Reduction::Mean if n == 0 => return None,
                Reduction::Mean => sums.map(|s| s / n as f64),
                Reduction::Count => [n as f64; N],
            };
            Some(Group { key, value })
        })
        .collect();
    RecapTable { groups }
}

/// Group `rows` by `key` and reduce one value per row.
pub fn recap<'a, I, K>(
    rows: I,
    key: impl Fn(&Rental) -> K,
    value: impl Fn(&Rental) -> f64,
    reduction: Reduction,
) -> RecapTable<K>
where
    I: IntoIterator<Item = &'a Rental>,
    K: Ord,
{
    recap_columns(rows, key, |r| [value(r)], reduction).map_values(|[v]| v)
}

/// [`recap`] over a typed column.
pub fn recap_column<'a, I, K>(
    rows: I,
    key: impl Fn(&Rental) -> K,
    column: Column,
    reduction: Reduction,
) -> RecapTable<K>
where
    I: IntoIterator<Item = &'a Rental>,
    K: Ord,
{
    recap(rows, key, |r| column.value(r), reduction)
}

/// Registered and casual totals for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonTotals {
    pub registered: f64,
    pub casual: f64,
}

impl SeasonTotals {
    pub fn total(&self) -> f64 {
        self.registered + self.casual
    }
}

pub fn month_recap(rows: &[Rental]) -> RecapTable<YearMonth> {
    recap_column(rows, Rental::year_month, Column::Total, Reduction::Sum)
}

pub fn season_recap(rows: &[Rental]) -> RecapTable<String, SeasonTotals> {
    recap_columns(
        rows,
        |r| r.season.clone(),
        |r| [Column::Registered.value(r), Column::Casual.value(r)],
        Reduction::Sum,
    )
    .map_values(|[registered, casual]| SeasonTotals { registered, casual })
}

pub fn weather_recap(rows: &[Rental]) -> RecapTable<String> {
    recap_column(rows, |r| r.weather.clone(), Column::Total, Reduction::Mean)
}

/// Hourly totals over weekday rows.
pub fn weekday_hour_recap(rows: &[Rental]) -> RecapTable<u8> {
    recap_column(
        rows.iter().filter(|r| r.is_weekday()),
        |r| r.hour,
        Column::Total,
        Reduction::Sum,
    )
}

/// Hourly totals over holidays and non-weekdays.
pub fn holiday_hour_recap(rows: &[Rental]) -> RecapTable<u8> {
    recap_column(
        rows.iter().filter(|r| r.is_day_off()),
        |r| r.hour,
        Column::Total,
        Reduction::Sum,
    )
}

/// Per-date reduction of one column.
pub fn by_date(rows: &[Rental], column: Column, reduction: Reduction) -> RecapTable<NaiveDate> {
    recap_column(rows, |r| r.date, column, reduction)
}

pub fn daily_recap(rows: &[Rental]) -> RecapTable<NaiveDate> {
    by_date(rows, Column::Total, Reduction::Sum)
}

pub fn registered_recap(rows: &[Rental]) -> RecapTable<NaiveDate> {
    by_date(rows, Column::Registered, Reduction::Sum)
}

pub fn casual_recap(rows: &[Rental]) -> RecapTable<NaiveDate> {
    by_date(rows, Column::Casual, Reduction::Sum)
}

pub fn temperature_recap(rows: &[Rental]) -> RecapTable<NaiveDate> {
    by_date(rows, Column::Temperature, Reduction::Mean)
}

pub fn humidity_recap(rows: &[Rental]) -> RecapTable<NaiveDate> {
    by_date(rows, Column::Humidity, Reduction::Mean)
}
