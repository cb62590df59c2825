//! Export functionality for instructions and telemetry.
//!
//! CSV and JSON serialization of the engine's outputs for the host
//! platform's execution and record-keeping collaborators.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use broome_rebalance::RebalanceInstruction;

use crate::telemetry::DailyRecord;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Render rebalance instructions as a CSV string.
pub fn instructions_csv(instructions: &[RebalanceInstruction]) -> Result<String, ExportError> {
    to_csv_string(instructions)
}

/// Write rebalance instructions to `path` in the given format.
pub fn export_instructions(
    instructions: &[RebalanceInstruction],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    export_records(instructions, path, format)
}

/// Write daily telemetry records to `path` in the given format.
pub fn export_daily_records(
    records: &[DailyRecord],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    export_records(records, path, format)
}

fn export_records<T: Serialize>(
    records: &[T],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let contents = match format {
        ExportFormat::Csv => to_csv_string(records)?,
        ExportFormat::Json => serde_json::to_string(records)?,
        ExportFormat::PrettyJson => serde_json::to_string_pretty(records)?,
    };
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

fn to_csv_string<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instructions() -> Vec<RebalanceInstruction> {
        vec![
            RebalanceInstruction::open("AAA", 0.1),
            RebalanceInstruction::close("OLD"),
        ]
    }

    #[test]
    fn test_csv_rendering() {
        let csv = instructions_csv(&instructions()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("symbol,target_weight,action"));
        assert_eq!(lines.next(), Some("AAA,0.1,open"));
        assert_eq!(lines.next(), Some("OLD,0.0,close"));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }

    #[test]
    fn test_json_export() {
        let json = serde_json::to_string(&instructions()).unwrap();
        assert!(json.contains("\"action\":\"open\""));
        assert!(json.contains("\"symbol\":\"AAA\""));
    }
}
