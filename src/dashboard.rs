//! The view model: everything a renderer needs for one date range.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::data::{Rental, Table, YearMonth};
use crate::filter::{filter, DateRange};
use crate::recap::{self, highlight_max, peak, RecapTable, SeasonTotals};
use crate::summary::{summarize, Summary};

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar<K, V = f64> {
    pub key: K,
    pub value: V,
    pub highlighted: bool,
}

/// Bars plus the key of the tallest one (`None` when there are no bars).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart<K, V = f64> {
    pub bars: Vec<Bar<K, V>>,
    pub peak: Option<K>,
}

impl<K, V> BarChart<K, V> {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl<K: Clone + PartialEq, V: Clone> BarChart<K, V> {
    /// Only the peak bar is highlighted.
    fn single_peak(table: &RecapTable<K, V>, score: impl Fn(&V) -> f64) -> Self {
        let peak = peak(table, &score).map(|g| g.key.clone());
        let bars = table
            .iter()
            .map(|g| Bar {
                key: g.key.clone(),
                value: g.value.clone(),
                highlighted: peak.as_ref() == Some(&g.key),
            })
            .collect();
        Self { bars, peak }
    }

    /// Every bar tied for the maximum is highlighted.
    fn all_max(table: &RecapTable<K, V>, score: impl Fn(&V) -> f64) -> Self {
        let peak = peak(table, &score).map(|g| g.key.clone());
        let flags = highlight_max(table, &score);
        let bars = table
            .iter()
            .zip(flags)
            .map(|(g, highlighted)| Bar {
                key: g.key.clone(),
                value: g.value.clone(),
                highlighted,
            })
            .collect();
        Self { bars, peak }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Customer {
    Casual,
    Registered,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Customer::Casual => "casual",
            Customer::Registered => "registered",
        })
    }
}

/// Per-date series for the line charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DailySeries {
    pub total: RecapTable<NaiveDate>,
    pub registered: RecapTable<NaiveDate>,
    pub casual: RecapTable<NaiveDate>,
    pub temperature: RecapTable<NaiveDate>,
    pub humidity: RecapTable<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub range: DateRange,
    pub rows: usize,
    pub summary: Summary,
    pub monthly_trend: RecapTable<YearMonth>,
    /// Casual vs registered totals. Empty (no bars, no peak) when the range
    /// holds no rows, like every other chart.
    pub customers: BarChart<Customer>,
    pub weekday_hours: BarChart<u8>,
    pub holiday_hours: BarChart<u8>,
    pub weather: BarChart<String>,
    pub seasons: BarChart<String, SeasonTotals>,
    pub daily: DailySeries,
}

/// Filter `table` to `range` and compute every recap over the result.
pub fn render(table: &Table, range: DateRange) -> DashboardView {
    let rows = filter(table.rows(), &range);
    info!(
        start = %range.start,
        end = %range.end,
        rows = rows.len(),
        "rendering dashboard"
    );
    let view = build_view(rows, range);
    debug!(
        months = view.monthly_trend.len(),
        days = view.daily.total.len(),
        "dashboard ready"
    );
    view
}

fn build_view(rows: &[Rental], range: DateRange) -> DashboardView {
    let summary = summarize(rows);
    // No rows means no customer bars, not two zero-height bars.
    let customers = if rows.is_empty() {
        RecapTable::default()
    } else {
        customer_recap(&summary)
    };

    DashboardView {
        range,
        rows: rows.len(),
        summary,
        monthly_trend: recap::month_recap(rows),
        customers: BarChart::all_max(&customers, |v| *v),
        weekday_hours: BarChart::single_peak(&recap::weekday_hour_recap(rows), |v| *v),
        holiday_hours: BarChart::single_peak(&recap::holiday_hour_recap(rows), |v| *v),
        weather: BarChart::all_max(&recap::weather_recap(rows), |v| *v),
        seasons: BarChart::single_peak(&recap::season_recap(rows), SeasonTotals::total),
        daily: DailySeries {
            total: recap::daily_recap(rows),
            registered: recap::registered_recap(rows),
            casual: recap::casual_recap(rows),
            temperature: recap::temperature_recap(rows),
            humidity: recap::humidity_recap(rows),
        },
    }
}

/// Casual vs registered totals.
fn customer_recap(summary: &Summary) -> RecapTable<Customer> {
    RecapTable::from_groups(vec![
        (Customer::Casual, summary.casual_users as f64),
        (Customer::Registered, summary.registered_users as f64),
    ])
}
