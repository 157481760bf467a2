// src/report.rs
use std::{fmt::Display, io::Write};

use anyhow::Result;

use crate::dashboard::{BarChart, DashboardView};
use crate::data::Rental;
use crate::recap::RecapTable;

const NO_DATA: &str = "no data";

fn fmt_mean(v: Option<f64>) -> String {
    v.map_or_else(|| NO_DATA.to_string(), |v| format!("{:.2}", v))
}

/// Plain-text rendering of a [`DashboardView`].
pub fn write_text<W: Write>(out: &mut W, view: &DashboardView) -> Result<()> {
    writeln!(out, "CYKLING ANALYTICS DASHBOARD")?;
    writeln!(
        out,
        "range: {} .. {} ({} rows)",
        view.range.start, view.range.end, view.rows
    )?;

    // ─── rent summary ────────────────────────────────────────────────
    let s = &view.summary;
    writeln!(out, "\n== Rent Summary ==")?;
    writeln!(out, "Total User       {}", s.total_users)?;
    writeln!(out, "Registered User  {}", s.registered_users)?;
    writeln!(out, "Casual User      {}", s.casual_users)?;
    writeln!(out, "Mean Temperature {}", fmt_mean(s.mean_temperature))?;
    writeln!(out, "Mean Humidity    {}", fmt_mean(s.mean_humidity))?;

    writeln!(out, "\n== Monthly Trend ==")?;
    write_series(out, &view.monthly_trend)?;

    writeln!(out, "\n== Total Rents Based on Customers ==")?;
    write_bars(out, &view.customers, |v| format!("{:.0}", v))?;

    writeln!(out, "\n== Weekday Rent Hour Recap ==")?;
    write_bars(out, &view.weekday_hours, |v| format!("{:.0}", v))?;

    writeln!(out, "\n== Holiday Rent Hour Recap ==")?;
    write_bars(out, &view.holiday_hours, |v| format!("{:.0}", v))?;

    writeln!(out, "\n== Weather Recap (mean total) ==")?;
    write_bars(out, &view.weather, |v| format!("{:.2}", v))?;

    writeln!(out, "\n== Season Recap ==")?;
    write_bars(out, &view.seasons, |v| {
        format!(
            "{:.0} (registered {:.0}, casual {:.0})",
            v.total(),
            v.registered,
            v.casual
        )
    })?;

    Ok(())
}

fn write_series<W: Write, K: Display>(out: &mut W, table: &RecapTable<K>) -> Result<()> {
    if table.is_empty() {
        writeln!(out, "  {}", NO_DATA)?;
    }
    for g in table {
        writeln!(out, "  {:<12} {:.0}", g.key.to_string(), g.value)?;
    }
    Ok(())
}

fn write_bars<W: Write, K: Display, V>(
    out: &mut W,
    chart: &BarChart<K, V>,
    fmt_value: impl Fn(&V) -> String,
) -> Result<()> {
    if chart.is_empty() {
        writeln!(out, "  {}", NO_DATA)?;
    }
    for bar in &chart.bars {
        let mark = if bar.highlighted { " *" } else { "" };
        writeln!(
            out,
            "  {:<12} {}{}",
            bar.key.to_string(),
            fmt_value(&bar.value),
            mark
        )?;
    }
    Ok(())
}

/// Dump the raw rows, one CSV-ish line each.
pub fn write_dataset<W: Write>(out: &mut W, rows: &[Rental]) -> Result<()> {
    writeln!(
        out,
        "date,year,month,hour,weekday,holiday,season,weather,temperature,hum,casual,registered,total"
    )?;
    for r in rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.date,
            r.year,
            r.month,
            r.hour,
            r.weekday,
            r.holiday,
            r.season,
            r.weather,
            r.temperature,
            r.humidity,
            r.casual,
            r.registered,
            r.total
        )?;
    }
    Ok(())
}
