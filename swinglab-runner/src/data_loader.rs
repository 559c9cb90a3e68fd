//! CSV bar ingestion.
//!
//! Expects a header row with `date,open,high,low,close`; extra columns
//! (volume, adj_close, …) are ignored. Dates are `YYYY-MM-DD`, with a
//! `MM/DD/YYYY` fallback for legacy exchange exports. The loader does not
//! sort, dedupe, or validate prices — the engine owns those contracts and
//! reports violations itself.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use swinglab_core::domain::Bar;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unparseable date '{value}' (expected YYYY-MM-DD or MM/DD/YYYY)")]
    BadDate { row: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct BarRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .map_err(|_| LoadError::BadDate {
            row,
            value: value.to_string(),
        })
}

/// Load all bars from a CSV file, in file order.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut bars = Vec::new();
    for (idx, record) in reader.deserialize::<BarRow>().enumerate() {
        let row = record?;
        // +2: one for the header, one for 1-based file lines.
        let line = idx + 2;
        bars.push(Bar {
            date: parse_date(&row.date, line)?,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
        });
    }
    Ok(bars)
}
