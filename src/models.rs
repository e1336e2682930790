use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded instant of a workout, as yielded by the file decoder.
///
/// Every field is optional. Enhanced variants carry the same quantity at a
/// higher precision and win over the standard field when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Instantaneous speed in meters per second
    pub speed: Option<f64>,

    /// High-precision speed in meters per second
    pub enhanced_speed: Option<f64>,

    /// Cumulative distance in meters
    pub distance: Option<f64>,

    /// High-precision cumulative distance in meters
    pub enhanced_distance: Option<f64>,

    /// Altitude in meters
    pub altitude: Option<f64>,

    /// High-precision altitude in meters
    pub enhanced_altitude: Option<f64>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<u16>,

    /// Recording instant
    pub timestamp: Option<DateTime<Utc>>,
}

impl RawSample {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_heart_rate(mut self, heart_rate: u16) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Activity-level figures recorded once per activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Total ascent in meters
    pub total_ascent: Option<f64>,

    /// High-precision total ascent in meters
    pub enhanced_total_ascent: Option<f64>,

    /// Average heart rate in beats per minute
    pub avg_heart_rate: Option<u16>,

    /// Maximum heart rate in beats per minute
    pub max_heart_rate: Option<u16>,

    /// Total distance in meters
    pub total_distance: Option<f64>,

    /// Time spent moving with the timer running, in seconds
    pub total_timer_time: Option<f64>,

    /// Session start instant
    pub start_time: Option<DateTime<Utc>>,
}

/// Pace at a point along the activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceSample {
    pub distance_km: f64,
    pub pace_sec_per_km: f64,
    pub speed_ms: f64,
}

/// Altitude at a point along the activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeSample {
    pub distance_km: f64,
    pub altitude_m: f64,
}

/// Heart rate at a point along the activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub distance_km: f64,
    pub heart_rate_bpm: u16,
}

/// One distance-keyed row of a shared chart.
///
/// Cells are set only when the value passed the same filter as the matching
/// per-metric series, so all metrics in a row share `distance_km`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub distance_km: f64,
    pub pace_sec_per_km: Option<f64>,
    pub speed_ms: Option<f64>,
    pub altitude_m: Option<f64>,
    pub heart_rate_bpm: Option<u16>,
}

/// Where the elevation gain figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationSource {
    /// Taken verbatim from the session summary
    Session,
    /// Summed from positive altitude deltas
    Samples,
}

impl std::fmt::Display for ElevationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElevationSource::Session => write!(f, "session"),
            ElevationSource::Samples => write!(f, "samples"),
        }
    }
}

/// Aggregate figures for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    /// Total ascent in meters, never negative
    pub elevation_gain_m: f64,

    pub elevation_source: ElevationSource,

    pub avg_heart_rate_bpm: Option<u16>,

    pub max_heart_rate_bpm: Option<u16>,

    /// Average pace over the whole activity, from total distance and duration
    pub average_pace_sec_per_km: Option<f64>,

    pub total_distance_km: Option<f64>,
}

impl Default for ActivityMetrics {
    fn default() -> Self {
        Self {
            elevation_gain_m: 0.0,
            elevation_source: ElevationSource::Samples,
            avg_heart_rate_bpm: None,
            max_heart_rate_bpm: None,
            average_pace_sec_per_km: None,
            total_distance_km: None,
        }
    }
}

/// The three distance-indexed series plus the aligned chart table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub pace: Vec<PaceSample>,
    pub altitude: Vec<AltitudeSample>,
    pub heart_rate: Vec<HeartRateSample>,
    pub chart: Vec<ChartRow>,
}

impl MetricSeries {
    pub fn is_empty(&self) -> bool {
        self.pace.is_empty() && self.altitude.is_empty() && self.heart_rate.is_empty()
    }
}

/// Full engine output for one activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedActivity {
    pub series: MetricSeries,
    pub metrics: ActivityMetrics,
}

/// Decoded payload of one workout file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedActivity {
    pub samples: Vec<RawSample>,
    pub session: Option<SessionSummary>,
}

/// Format a pace in seconds per kilometer as `m:ss`
pub fn format_pace(pace_sec_per_km: f64) -> String {
    let total = pace_sec_per_km.round().max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
