//! Terminal tables for derived activities.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::export::SeriesKind;
use crate::import::parallel::BatchSummary;
use crate::models::{format_pace, ActivityMetrics, MetricSeries};
use crate::series::ZoomWindow;

const EMPTY_CELL: &str = "-";

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Pace (/km)")]
    pace: String,
    #[tabled(rename = "Speed (m/s)")]
    speed: String,
    #[tabled(rename = "Altitude (m)")]
    altitude: String,
    #[tabled(rename = "HR (bpm)")]
    heart_rate: String,
}

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Samples")]
    samples: usize,
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Gain (m)")]
    elevation_gain: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn cell<T>(value: Option<T>, render: impl Fn(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Two-column table of activity aggregates
pub fn metrics_table(metrics: &ActivityMetrics) -> String {
    let rows = vec![
        MetricRow {
            metric: "Distance",
            value: cell(metrics.total_distance_km, |d| format!("{:.2} km", d)),
        },
        MetricRow {
            metric: "Average pace",
            value: cell(metrics.average_pace_sec_per_km, |p| {
                format!("{} /km", format_pace(p))
            }),
        },
        MetricRow {
            metric: "Elevation gain",
            value: format!(
                "{:.0} m ({})",
                metrics.elevation_gain_m, metrics.elevation_source
            ),
        },
        MetricRow {
            metric: "Average HR",
            value: cell(metrics.avg_heart_rate_bpm, |hr| format!("{} bpm", hr)),
        },
        MetricRow {
            metric: "Max HR",
            value: cell(metrics.max_heart_rate_bpm, |hr| format!("{} bpm", hr)),
        },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Rows of one series visible through `window`
pub fn series_table(series: &MetricSeries, kind: SeriesKind, window: &ZoomWindow) -> String {
    let rows: Vec<SeriesRow> = match kind {
        SeriesKind::Chart => window
            .slice(&series.chart)
            .iter()
            .map(|row| SeriesRow {
                distance: format!("{:.3}", row.distance_km),
                pace: cell(row.pace_sec_per_km, format_pace),
                speed: cell(row.speed_ms, |s| format!("{:.2}", s)),
                altitude: cell(row.altitude_m, |a| format!("{:.1}", a)),
                heart_rate: cell(row.heart_rate_bpm, |hr| hr.to_string()),
            })
            .collect(),
        SeriesKind::Pace => window
            .slice(&series.pace)
            .iter()
            .map(|s| SeriesRow {
                distance: format!("{:.3}", s.distance_km),
                pace: format_pace(s.pace_sec_per_km),
                speed: format!("{:.2}", s.speed_ms),
                altitude: EMPTY_CELL.to_string(),
                heart_rate: EMPTY_CELL.to_string(),
            })
            .collect(),
        SeriesKind::Altitude => window
            .slice(&series.altitude)
            .iter()
            .map(|s| SeriesRow {
                distance: format!("{:.3}", s.distance_km),
                pace: EMPTY_CELL.to_string(),
                speed: EMPTY_CELL.to_string(),
                altitude: format!("{:.1}", s.altitude_m),
                heart_rate: EMPTY_CELL.to_string(),
            })
            .collect(),
        SeriesKind::HeartRate => window
            .slice(&series.heart_rate)
            .iter()
            .map(|s| SeriesRow {
                distance: format!("{:.3}", s.distance_km),
                pace: EMPTY_CELL.to_string(),
                speed: EMPTY_CELL.to_string(),
                altitude: EMPTY_CELL.to_string(),
                heart_rate: s.heart_rate_bpm.to_string(),
            })
            .collect(),
    };

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Per-file outcome table for a batch run
pub fn batch_table(summary: &BatchSummary) -> String {
    let rows: Vec<BatchRow> = summary
        .results
        .iter()
        .map(|r| BatchRow {
            file: r
                .file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| r.file_path.display().to_string()),
            samples: r.sample_count,
            distance: cell(
                r.metrics.as_ref().and_then(|m| m.total_distance_km),
                |d| format!("{:.2}", d),
            ),
            elevation_gain: cell(r.metrics.as_ref(), |m| {
                format!("{:.0}", m.elevation_gain_m)
            }),
            status: match &r.error {
                Some(err) => format!("failed: {}", err),
                None => "ok".to_string(),
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartRow, ElevationSource, PaceSample};

    #[test]
    fn test_metrics_table_contents() {
        let metrics = ActivityMetrics {
            elevation_gain_m: 340.0,
            elevation_source: ElevationSource::Session,
            avg_heart_rate_bpm: Some(148),
            max_heart_rate_bpm: None,
            average_pace_sec_per_km: Some(300.0),
            total_distance_km: Some(10.0),
        };
        let table = metrics_table(&metrics);

        assert!(table.contains("10.00 km"));
        assert!(table.contains("5:00 /km"));
        assert!(table.contains("340 m (session)"));
        assert!(table.contains("148 bpm"));
    }

    #[test]
    fn test_series_table_respects_window() {
        let series = MetricSeries {
            pace: (1..=10)
                .map(|i| PaceSample {
                    distance_km: i as f64 / 10.0,
                    pace_sec_per_km: 300.0 + i as f64,
                    speed_ms: 3.0,
                })
                .collect(),
            ..Default::default()
        };

        let table = series_table(&series, SeriesKind::Pace, &ZoomWindow::new(50.0, 100.0));
        assert!(table.contains("5:06"));
        assert!(table.contains("5:10"));
        assert!(!table.contains("5:05"));
    }

    #[test]
    fn test_chart_table_marks_missing_cells() {
        let series = MetricSeries {
            chart: vec![ChartRow {
                distance_km: 0.25,
                pace_sec_per_km: None,
                speed_ms: None,
                altitude_m: Some(102.0),
                heart_rate_bpm: None,
            }],
            ..Default::default()
        };
        let table = series_table(&series, SeriesKind::Chart, &ZoomWindow::default());
        assert!(table.contains("0.250"));
        assert!(table.contains("102.0"));
        assert!(table.contains(" - "));
    }
}
