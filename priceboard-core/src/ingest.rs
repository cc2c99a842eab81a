//! CSV ingestion with field-level validation.
//!
//! Uploads carry four columns: `date` (8-digit `YYYYMMDD`), `time` (compact
//! `HHMM`, e.g. "800"), `price_fcst` and `actual_price` (decimal). Every
//! field is validated here so that malformed data fails the import instead
//! of leaking NaNs or undateable rows into the views.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{parse_compact_date, parse_compact_time, Observation};

/// Errors from the ingestion layer. Each carries enough context to point
/// the user at the offending line.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid date '{value}' (expected 8-digit YYYYMMDD)")]
    BadDate { line: usize, value: String },

    #[error("line {line}: invalid time '{value}' (expected HHMM, e.g. 800)")]
    BadTime { line: usize, value: String },

    #[error("line {line}: invalid {column} '{value}' (expected a finite number)")]
    BadPrice {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("no data rows")]
    Empty,

    #[error("cannot derive a source name from '{0}'")]
    BadSourceName(String),
}

/// Raw CSV record; all fields come in as strings and are validated below.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    time: String,
    price_fcst: String,
    actual_price: String,
}

/// Read and validate one uploaded CSV file.
///
/// Returns the source name (the file's base name, extension stripped) and
/// its observations. Any malformed field fails the whole import.
pub fn read_csv_file(path: &Path) -> Result<(String, Vec<Observation>), IngestError> {
    let name = source_name(path)?;
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let observations = read_csv(file)?;
    Ok((name, observations))
}

/// Parse and validate CSV data from any reader. Expects a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Observation>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();
    for (index, record) in rdr.deserialize::<RawRecord>().enumerate() {
        // Header is line 1, first record line 2.
        let line = index + 2;
        let record = record?;

        let date = parse_compact_date(&record.date).ok_or_else(|| IngestError::BadDate {
            line,
            value: record.date.clone(),
        })?;
        let time = parse_compact_time(&record.time).ok_or_else(|| IngestError::BadTime {
            line,
            value: record.time.clone(),
        })?;
        let forecast_price = parse_price(&record.price_fcst, "price_fcst", line)?;
        let actual_price = parse_price(&record.actual_price, "actual_price", line)?;

        observations.push(Observation {
            date,
            time,
            forecast_price,
            actual_price,
        });
    }

    if observations.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(observations)
}

/// The source name is the uploaded file's base name.
pub fn source_name(path: &Path) -> Result<String, IngestError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| IngestError::BadSourceName(path.display().to_string()))
}

fn parse_price(value: &str, column: &'static str, line: usize) -> Result<f64, IngestError> {
    let bad = || IngestError::BadPrice {
        line,
        column,
        value: value.to_string(),
    };
    let price: f64 = value.parse().map_err(|_| bad())?;
    if !price.is_finite() {
        return Err(bad());
    }
    Ok(price)
}
