use serde::Serialize;
use std::io::Write;
use std::path::Path;

use super::SeriesKind;
use crate::error::ExportError;
use crate::models::MetricSeries;

/// Export one distance-indexed table to a CSV file
pub fn export_series<P: AsRef<Path>>(
    series: &MetricSeries,
    kind: SeriesKind,
    output_path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(output_path)?;
    write_series(series, kind, file)
}

/// Write one distance-indexed table as CSV.
///
/// Missing chart cells are written as empty fields.
pub fn write_series<W: Write>(
    series: &MetricSeries,
    kind: SeriesKind,
    writer: W,
) -> Result<(), ExportError> {
    match kind {
        SeriesKind::Chart => write_rows(&series.chart, writer),
        SeriesKind::Pace => write_rows(&series.pace, writer),
        SeriesKind::Altitude => write_rows(&series.altitude, writer),
        SeriesKind::HeartRate => write_rows(&series.heart_rate, writer),
    }
}

fn write_rows<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
