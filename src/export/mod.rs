use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ExportError;
use crate::pipeline::ActivityReport;

pub mod csv;
pub mod json;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_str(ext).ok())
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Which distance-indexed table to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    /// Aligned rows carrying every metric
    #[default]
    Chart,
    Pace,
    Altitude,
    HeartRate,
}

impl SeriesKind {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "chart" | "all" => Ok(SeriesKind::Chart),
            "pace" => Ok(SeriesKind::Pace),
            "altitude" | "elevation" => Ok(SeriesKind::Altitude),
            "heart-rate" | "hr" => Ok(SeriesKind::HeartRate),
            _ => Err(ExportError::UnsupportedFormat(format!("series '{}'", s))),
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Chart => write!(f, "chart"),
            SeriesKind::Pace => write!(f, "pace"),
            SeriesKind::Altitude => write!(f, "altitude"),
            SeriesKind::HeartRate => write!(f, "heart-rate"),
        }
    }
}

/// Write a derived activity in `format`.
///
/// CSV carries one table (`series`); JSON carries the whole report.
pub fn export_report<P: AsRef<Path>>(
    report: &ActivityReport,
    format: ExportFormat,
    series: SeriesKind,
    output_path: P,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => csv::export_series(&report.derived.series, series, output_path),
        ExportFormat::Json => json::export_json(report, output_path),
    }
}
