//! Builds the distance-indexed pace, altitude and heart-rate series.

use super::distance::ResolvedDistance;
use super::normalize::NormalizedSample;
use super::DerivationConfig;
use crate::models::{AltitudeSample, ChartRow, HeartRateSample, MetricSeries, PaceSample};

/// Counters gathered while building series, used for diagnostics only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Samples that resolved a positive distance
    pub indexed: usize,
    /// Samples with no usable distance
    pub unindexed: usize,
    /// Pace values outside the plausible range
    pub pace_rejected: usize,
    /// Heart-rate values outside the plausible range
    pub heart_rate_rejected: usize,
}

/// Pace in seconds per kilometer for a speed, when it is plausible
pub fn plausible_pace(speed_ms: f64, config: &DerivationConfig) -> Option<f64> {
    if !(speed_ms.is_finite() && speed_ms > 0.0) {
        return None;
    }
    let pace = 1000.0 / speed_ms;
    (pace > 0.0 && pace < config.max_pace_sec_per_km).then_some(pace)
}

/// Heart rate when it lies strictly within the configured bounds
pub fn plausible_heart_rate(heart_rate: u16, config: &DerivationConfig) -> Option<u16> {
    (heart_rate > config.min_heart_rate_bpm && heart_rate < config.max_heart_rate_bpm)
        .then_some(heart_rate)
}

/// Emit series entries for every sample with a resolved distance.
///
/// `samples` and `distances` are index-aligned: `distances[i]` is the result
/// of reconstructing `samples[i]`. Each series filters independently, so the
/// three vectors generally have different lengths; `chart` holds one row per
/// indexed sample with the surviving values of all three metrics.
pub fn build_series(
    samples: &[NormalizedSample],
    distances: &[Option<ResolvedDistance>],
    config: &DerivationConfig,
) -> (MetricSeries, BuildStats) {
    let mut series = MetricSeries::default();
    let mut stats = BuildStats::default();

    for (sample, distance) in samples.iter().zip(distances) {
        let meters = match distance {
            Some(resolved) if resolved.meters > 0.0 => resolved.meters,
            _ => {
                stats.unindexed += 1;
                continue;
            }
        };
        stats.indexed += 1;
        let distance_km = meters / 1000.0;

        let mut row = ChartRow {
            distance_km,
            pace_sec_per_km: None,
            speed_ms: None,
            altitude_m: None,
            heart_rate_bpm: None,
        };

        if let Some(speed) = sample.speed.filter(|s| *s > 0.0) {
            match plausible_pace(speed, config) {
                Some(pace) => {
                    series.pace.push(PaceSample {
                        distance_km,
                        pace_sec_per_km: pace,
                        speed_ms: speed,
                    });
                    row.pace_sec_per_km = Some(pace);
                    row.speed_ms = Some(speed);
                }
                None => stats.pace_rejected += 1,
            }
        }

        if let Some(altitude) = sample.altitude.filter(|a| a.is_finite()) {
            series.altitude.push(AltitudeSample {
                distance_km,
                altitude_m: altitude,
            });
            row.altitude_m = Some(altitude);
        }

        if let Some(heart_rate) = sample.heart_rate.filter(|hr| *hr > 0) {
            match plausible_heart_rate(heart_rate, config) {
                Some(bpm) => {
                    series.heart_rate.push(HeartRateSample {
                        distance_km,
                        heart_rate_bpm: bpm,
                    });
                    row.heart_rate_bpm = Some(bpm);
                }
                None => stats.heart_rate_rejected += 1,
            }
        }

        series.chart.push(row);
    }

    (series, stats)
}
