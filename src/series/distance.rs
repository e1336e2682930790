//! Distance reconstruction for samples without a usable cumulative distance.
//!
//! Two methods are tried per sample, in order:
//!
//! 1. **Recorded distance**: the normalized cumulative distance, when present
//!    and positive, is used as-is and becomes the new running distance.
//! 2. **Speed integration**: otherwise, when speed is positive and the sample
//!    is not the first one, `speed × elapsed` is added to the running
//!    distance. Elapsed time is the timestamp delta to the previous sample
//!    when both carry a timestamp, else the configured default interval.
//!
//! A sample that satisfies neither method resolves no distance and is left
//! out of every series.

use chrono::{DateTime, Utc};

use super::normalize::NormalizedSample;
use super::DerivationConfig;

/// How a sample's distance was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMethod {
    Recorded,
    Integrated,
}

/// A resolved cumulative distance in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDistance {
    pub meters: f64,
    pub method: DistanceMethod,
}

/// Running state of one reconstruction pass.
///
/// The state lives only for the duration of a single pass over one sample
/// list; a fresh reconstructor must be used for every activity.
#[derive(Debug, Clone)]
pub struct DistanceReconstructor {
    last_known_m: f64,
    previous_timestamp: Option<DateTime<Utc>>,
    samples_seen: usize,
    default_interval_secs: f64,
}

impl DistanceReconstructor {
    pub fn new(config: &DerivationConfig) -> Self {
        Self {
            last_known_m: 0.0,
            previous_timestamp: None,
            samples_seen: 0,
            default_interval_secs: config.default_sample_interval_secs,
        }
    }

    /// Resolve the distance for the next sample in recording order
    pub fn resolve(&mut self, sample: &NormalizedSample) -> Option<ResolvedDistance> {
        let is_first = self.samples_seen == 0;
        let previous_timestamp = self.previous_timestamp;

        self.samples_seen += 1;
        self.previous_timestamp = sample.timestamp;

        if let Some(distance) = sample.distance.filter(|d| d.is_finite() && *d > 0.0) {
            self.last_known_m = distance;
            return Some(ResolvedDistance {
                meters: distance,
                method: DistanceMethod::Recorded,
            });
        }

        if is_first {
            return None;
        }

        let speed = sample.speed.filter(|s| s.is_finite() && *s > 0.0)?;
        let elapsed = self.elapsed_secs(previous_timestamp, sample.timestamp);

        let integrated = self.last_known_m + speed * elapsed;
        if !integrated.is_finite() {
            return None;
        }

        self.last_known_m = integrated;
        Some(ResolvedDistance {
            meters: self.last_known_m,
            method: DistanceMethod::Integrated,
        })
    }

    /// Running distance in meters after the samples resolved so far
    pub fn last_known_m(&self) -> f64 {
        self.last_known_m
    }

    fn elapsed_secs(
        &self,
        previous: Option<DateTime<Utc>>,
        current: Option<DateTime<Utc>>,
    ) -> f64 {
        match (previous, current) {
            (Some(prev), Some(curr)) => {
                let millis = (curr - prev).num_milliseconds();
                // Out-of-order timestamps contribute no movement.
                (millis as f64 / 1000.0).max(0.0)
            }
            _ => self.default_interval_secs,
        }
    }
}

/// Resolve the distance of every sample in one pass
pub fn reconstruct_distances(
    samples: &[NormalizedSample],
    config: &DerivationConfig,
) -> Vec<Option<ResolvedDistance>> {
    let mut reconstructor = DistanceReconstructor::new(config);
    samples
        .iter()
        .map(|sample| reconstructor.resolve(sample))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn speed_only(speed: f64) -> NormalizedSample {
        NormalizedSample {
            speed: Some(speed),
            ..Default::default()
        }
    }

    fn meters(resolved: &[Option<ResolvedDistance>]) -> Vec<Option<f64>> {
        resolved.iter().map(|r| r.map(|d| d.meters)).collect()
    }

    #[test]
    fn test_speed_integration_with_default_interval() {
        let samples = vec![speed_only(2.0), speed_only(2.0), speed_only(2.0)];
        let resolved = reconstruct_distances(&samples, &DerivationConfig::default());

        assert_eq!(meters(&resolved), vec![None, Some(2.0), Some(4.0)]);
        assert_eq!(resolved[1].unwrap().method, DistanceMethod::Integrated);
    }

    #[test]
    fn test_recorded_distance_seeds_integration() {
        let samples = vec![
            NormalizedSample {
                distance: Some(100.0),
                speed: Some(3.0),
                ..Default::default()
            },
            speed_only(3.0),
            NormalizedSample {
                distance: Some(110.0),
                ..Default::default()
            },
        ];
        let resolved = reconstruct_distances(&samples, &DerivationConfig::default());

        assert_eq!(meters(&resolved), vec![Some(100.0), Some(103.0), Some(110.0)]);
        assert_eq!(resolved[0].unwrap().method, DistanceMethod::Recorded);
    }

    #[test]
    fn test_timestamp_delta_used_when_both_present() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        let samples = vec![
            NormalizedSample {
                speed: Some(3.0),
                timestamp: Some(start),
                ..Default::default()
            },
            NormalizedSample {
                speed: Some(3.0),
                timestamp: Some(start + Duration::seconds(5)),
                ..Default::default()
            },
            // No timestamp: falls back to the default interval
            speed_only(4.0),
        ];
        let resolved = reconstruct_distances(&samples, &DerivationConfig::default());

        assert_eq!(meters(&resolved), vec![None, Some(15.0), Some(19.0)]);
    }

    #[test]
    fn test_zero_distance_falls_back_to_speed() {
        let samples = vec![
            NormalizedSample {
                distance: Some(0.0),
                ..Default::default()
            },
            NormalizedSample {
                distance: Some(0.0),
                speed: Some(2.5),
                ..Default::default()
            },
        ];
        let resolved = reconstruct_distances(&samples, &DerivationConfig::default());

        assert_eq!(meters(&resolved), vec![None, Some(2.5)]);
    }

    #[test]
    fn test_first_sample_never_integrates() {
        let mut reconstructor = DistanceReconstructor::new(&DerivationConfig::default());
        assert!(reconstructor.resolve(&speed_only(5.0)).is_none());
        assert_eq!(reconstructor.last_known_m(), 0.0);
    }

    #[test]
    fn test_no_speed_no_distance_resolves_nothing() {
        let samples = vec![speed_only(2.0), NormalizedSample::default(), speed_only(0.0)];
        let resolved = reconstruct_distances(&samples, &DerivationConfig::default());

        assert!(resolved.iter().all(Option::is_none));
    }

    #[test]
    fn test_backwards_timestamp_adds_no_distance() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        let samples = vec![
            NormalizedSample {
                distance: Some(50.0),
                timestamp: Some(start),
                ..Default::default()
            },
            NormalizedSample {
                speed: Some(3.0),
                timestamp: Some(start - Duration::seconds(2)),
                ..Default::default()
            },
        ];
        let resolved = reconstruct_distances(&samples, &DerivationConfig::default());

        assert_eq!(meters(&resolved), vec![Some(50.0), Some(50.0)]);
    }

    #[test]
    fn test_overflowing_integration_is_dropped() {
        let samples = vec![speed_only(1e308), speed_only(1e308), speed_only(1e308)];
        let mut reconstructor = DistanceReconstructor::new(&DerivationConfig::default());
        let resolved: Vec<_> = samples.iter().map(|s| reconstructor.resolve(s)).collect();

        assert_eq!(meters(&resolved), vec![None, Some(1e308), None]);
        assert_eq!(reconstructor.last_known_m(), 1e308);
    }
}
