//! Record normalization: picks which field variant wins for each sample.

use chrono::{DateTime, Utc};

use crate::models::RawSample;

/// Uniform view of a sample after enhanced/standard resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedSample {
    pub speed: Option<f64>,
    pub distance: Option<f64>,
    pub altitude: Option<f64>,
    pub heart_rate: Option<u16>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Resolve effective values for one sample.
///
/// No validation happens here: a value that is absent in both variants stays
/// `None`.
pub fn normalize(sample: &RawSample) -> NormalizedSample {
    NormalizedSample {
        speed: sample.enhanced_speed.or(sample.speed),
        distance: sample.enhanced_distance.or(sample.distance),
        altitude: sample.enhanced_altitude.or(sample.altitude),
        heart_rate: sample.heart_rate,
        timestamp: sample.timestamp,
    }
}
