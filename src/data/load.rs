// src/data/load.rs
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

use super::{date_parser::parse_date, Rental, Table};

/// One CSV record, before the date column is parsed.
/// Columns not named here (e.g. a leading index) are ignored.
#[derive(Debug, Deserialize)]
struct RentalRecord {
    date: String,
    year: String,
    month: String,
    hour: u8,
    weekday: u8,
    holiday: u8,
    season: String,
    weather: String,
    temperature: f64,
    hum: f64,
    casual: u64,
    registered: u64,
    total: u64,
}

impl RentalRecord {
    fn into_rental(self) -> Result<Rental> {
        let date = parse_date(&self.date)
            .ok_or_else(|| anyhow!("unparseable date `{}`", self.date))?;
        Ok(Rental {
            date,
            year: self.year,
            month: self.month,
            hour: self.hour,
            weekday: self.weekday,
            holiday: self.holiday,
            season: self.season,
            weather: self.weather,
            temperature: self.temperature,
            humidity: self.hum,
            casual: self.casual,
            registered: self.registered,
            total: self.total,
        })
    }
}

/// Open the CSV at `path` and build the date-sorted base table.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open dataset: {:?}", path))?;
    let table =
        read_table(file).with_context(|| format!("Failed to load dataset: {:?}", path))?;

    match table.full_range() {
        Some(range) => info!(
            rows = table.len(),
            min = %range.start,
            max = %range.end,
            "dataset loaded"
        ),
        None => info!("dataset loaded with no rows"),
    }
    Ok(table)
}

/// Parse CSV (header row first) from any reader into a sorted table.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<RentalRecord>().enumerate() {
        // header is line 1, so data record `idx` sits on line idx + 2
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let rental = record
            .into_rental()
            .with_context(|| format!("bad row at line {}", idx + 2))?;
        rows.push(rental);
    }
    debug!(rows = rows.len(), "parsed records");

    Ok(Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_rows::date;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,cykling::data=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const SAMPLE: &str = "\
,date,year,month,hour,weekday,holiday,season,weather,temperature,hum,casual,registered,total
0,2011-01-02,2011,Jan,0,0,0,Springer,Clear,9.84,81.0,3,13,16
1,2011-01-01,2011,Jan,1,0,0,Springer,Misty,9.02,80.0,8,32,40
2,2011-01-01,2011,Jan,0,0,0,Springer,Clear,9.84,75.0,5,27,32
";

    #[test]
    fn test_load_table_sorts_and_maps_columns() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(SAMPLE.as_bytes())?;

        let table = load_table(tmp.path())?;
        assert_eq!(table.len(), 3);

        // sorted by date, file order kept within a date
        let hours: Vec<_> = table.rows().iter().map(|r| (r.date, r.hour)).collect();
        assert_eq!(
            hours,
            vec![
                (date("2011-01-01"), 1),
                (date("2011-01-01"), 0),
                (date("2011-01-02"), 0),
            ]
        );

        let first = &table.rows()[0];
        assert_eq!(first.month, "Jan");
        assert_eq!(first.weather, "Misty");
        assert_eq!(first.humidity, 80.0);
        assert_eq!((first.casual, first.registered, first.total), (8, 32, 40));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_table("does/not/exist.csv").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open dataset"));
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let csv = "\
date,year,month,hour,weekday,holiday,season,weather,temperature,hum,casual,registered,total
not-a-date,2011,1,0,1,0,Spring,Clear,1.0,2.0,1,1,2
";
        let err = read_table(csv.as_bytes()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("line 2"), "{}", msg);
        assert!(msg.contains("not-a-date"), "{}", msg);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "date,year\n2011-01-01,2011\n";
        assert!(read_table(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_header_only_gives_empty_table() -> Result<()> {
        let csv = "date,year,month,hour,weekday,holiday,season,weather,temperature,hum,casual,registered,total\n";
        let table = read_table(csv.as_bytes())?;
        assert!(table.is_empty());
        Ok(())
    }
}
