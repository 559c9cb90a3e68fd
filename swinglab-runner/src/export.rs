//! Trade tape export (CSV/JSON).
//!
//! The tape is written in chronological order, exactly as simulated.
//! Consumers that prefer newest-first (tables, UIs) reverse it themselves.

use std::path::Path;

use swinglab_core::domain::TradeEvent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn write_trades_csv(path: &Path, trades: &[TradeEvent]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for trade in trades {
        writer.serialize(trade)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

pub fn write_trades_json(path: &Path, trades: &[TradeEvent]) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(trades)?;
    std::fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}
