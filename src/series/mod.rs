//! Activity time-series derivation engine
//!
//! Converts the decoded sample list of one finished activity into
//! distance-indexed pace, altitude and heart-rate series plus aggregate
//! figures. Every function here is a pure mapping from
//! `(samples, session)` to output: no hidden state survives a call, and
//! malformed or missing fields degrade to "no entry" rather than an error.

pub mod builder;
pub mod distance;
pub mod elevation;
pub mod normalize;
pub mod window;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    ActivityMetrics, DerivedActivity, HeartRateSample, MetricSeries, RawSample, SessionSummary,
};
use builder::{build_series, plausible_pace, BuildStats};
use distance::reconstruct_distances;
use elevation::elevation_gain;
use normalize::{normalize, NormalizedSample};

pub use window::{slice_window, window_bounds, ZoomWindow};

/// Plausibility bounds and defaults applied while deriving series.
///
/// All bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Slowest pace kept in the pace series, seconds per kilometer
    pub max_pace_sec_per_km: f64,

    /// Heart rate must be strictly above this
    pub min_heart_rate_bpm: u16,

    /// Heart rate must be strictly below this
    pub max_heart_rate_bpm: u16,

    /// Elapsed time assumed between samples lacking timestamps
    pub default_sample_interval_secs: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            max_pace_sec_per_km: 1800.0,
            min_heart_rate_bpm: 40,
            max_heart_rate_bpm: 220,
            default_sample_interval_secs: 1.0,
        }
    }
}

/// Derive series and aggregates with the default bounds
pub fn derive_activity(samples: &[RawSample], session: Option<&SessionSummary>) -> DerivedActivity {
    derive_activity_with(samples, session, &DerivationConfig::default())
}

/// Derive series and aggregates for one activity
pub fn derive_activity_with(
    samples: &[RawSample],
    session: Option<&SessionSummary>,
    config: &DerivationConfig,
) -> DerivedActivity {
    let normalized: Vec<NormalizedSample> = samples.iter().map(normalize).collect();
    let distances = reconstruct_distances(&normalized, config);
    let (series, stats) = build_series(&normalized, &distances, config);

    log_build_stats(samples.len(), &stats, &series);

    let (elevation_gain_m, elevation_source) = elevation_gain(&normalized, session);

    let last_distance_m = distances
        .iter()
        .rev()
        .flatten()
        .map(|d| d.meters)
        .find(|m| *m > 0.0);

    let metrics = ActivityMetrics {
        elevation_gain_m,
        elevation_source,
        avg_heart_rate_bpm: session
            .and_then(|s| s.avg_heart_rate)
            .or_else(|| mean_heart_rate(&series.heart_rate)),
        max_heart_rate_bpm: session
            .and_then(|s| s.max_heart_rate)
            .or_else(|| series.heart_rate.iter().map(|s| s.heart_rate_bpm).max()),
        average_pace_sec_per_km: average_pace(&normalized, last_distance_m, session, config),
        total_distance_km: session
            .and_then(|s| s.total_distance)
            .filter(|d| d.is_finite() && *d > 0.0)
            .or(last_distance_m)
            .map(|m| m / 1000.0),
    };

    DerivedActivity { series, metrics }
}

/// Derive only the series, skipping aggregates
pub fn derive_series(samples: &[RawSample], config: &DerivationConfig) -> MetricSeries {
    let normalized: Vec<NormalizedSample> = samples.iter().map(normalize).collect();
    let distances = reconstruct_distances(&normalized, config);
    build_series(&normalized, &distances, config).0
}

fn log_build_stats(sample_count: usize, stats: &BuildStats, series: &MetricSeries) {
    debug!(
        samples = sample_count,
        indexed = stats.indexed,
        unindexed = stats.unindexed,
        pace = series.pace.len(),
        altitude = series.altitude.len(),
        heart_rate = series.heart_rate.len(),
        pace_rejected = stats.pace_rejected,
        heart_rate_rejected = stats.heart_rate_rejected,
        "Derived activity series"
    );
}

fn mean_heart_rate(series: &[HeartRateSample]) -> Option<u16> {
    if series.is_empty() {
        return None;
    }
    let sum: u64 = series.iter().map(|s| s.heart_rate_bpm as u64).sum();
    Some((sum as f64 / series.len() as f64).round() as u16)
}

/// Whole-activity pace from total distance and duration.
///
/// Session totals are used when both are positive; otherwise the span between
/// the first and last timestamped samples over the last resolved distance.
fn average_pace(
    samples: &[NormalizedSample],
    last_distance_m: Option<f64>,
    session: Option<&SessionSummary>,
    config: &DerivationConfig,
) -> Option<f64> {
    let from_session = session.and_then(|s| {
        let distance = s.total_distance.filter(|d| d.is_finite() && *d > 0.0)?;
        let duration = s.total_timer_time.filter(|t| t.is_finite() && *t > 0.0)?;
        Some((distance, duration))
    });

    let (distance_m, duration_secs) = match from_session {
        Some(totals) => totals,
        None => {
            let first = samples.iter().find_map(|s| s.timestamp)?;
            let last = samples.iter().rev().find_map(|s| s.timestamp)?;
            let duration = (last - first).num_milliseconds() as f64 / 1000.0;
            (last_distance_m?, duration)
        }
    };

    if duration_secs <= 0.0 {
        return None;
    }

    // Same plausibility rule as the per-sample pace series
    plausible_pace(distance_m / duration_secs, config)
}
