use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use cykling::{
    data::load_table, filter, render, report, DashboardView, DateRange, Rental, Table,
};
use serde::Serialize;
use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Parser)]
#[command(author, version, about = "CYKLING bike rental analytics dashboard")]
struct Args {
    /// Pre-aggregated rentals CSV
    #[arg(long, default_value = "main_data.csv")]
    data: PathBuf,
    /// First day of the range (YYYY-MM-DD); defaults to the earliest date
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day of the range (YYYY-MM-DD); defaults to the latest date
    #[arg(long)]
    end: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Also print the rows inside the range (as a `dataset` field for json/yaml)
    #[arg(long)]
    show_dataset: bool,
}

/// Fill in missing bounds from the table and reject dates it cannot cover.
fn resolve_range(
    table: &Table,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    let Some(full) = table.full_range() else {
        bail!("dataset is empty");
    };
    let range = DateRange::new(start.unwrap_or(full.start), end.unwrap_or(full.end));
    for (name, date) in [("start", range.start), ("end", range.end)] {
        if !full.contains(date) {
            bail!(
                "{} date {} is outside the dataset ({} .. {})",
                name,
                date,
                full.start,
                full.end
            );
        }
    }
    Ok(range)
}

/// JSON/YAML document: the view, plus the raw rows when requested.
#[derive(Serialize)]
struct Document<'a> {
    #[serde(flatten)]
    view: &'a DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    dataset: Option<&'a [Rental]>,
}

/// Write the view in `format`. Serialized formats stay a single document.
fn emit<W: Write>(
    out: &mut W,
    format: Format,
    view: &DashboardView,
    dataset: Option<&[Rental]>,
) -> Result<()> {
    match format {
        Format::Text => {
            report::write_text(out, view)?;
            if let Some(rows) = dataset {
                writeln!(out, "\n== Dataset ==")?;
                report::write_dataset(out, rows)?;
            }
        }
        Format::Json => {
            let doc = Document { view, dataset };
            serde_json::to_writer_pretty(&mut *out, &doc).context("serializing view to JSON")?;
            writeln!(out)?;
        }
        Format::Yaml => {
            let doc = Document { view, dataset };
            serde_yaml::to_writer(&mut *out, &doc).context("serializing view to YAML")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) load the base table once ─────────────────────────────────
    let table = load_table(&args.data)?;

    // ─── 3) filter + recap for the requested range ───────────────────
    let range = resolve_range(&table, args.start, args.end)?;
    let view = render(&table, range);

    // ─── 4) emit ─────────────────────────────────────────────────────
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let dataset = args.show_dataset.then(|| filter(table.rows(), &range));
    emit(&mut out, args.format, &view, dataset)?;
    out.flush()?;

    info!("done");
    Ok(())
}
