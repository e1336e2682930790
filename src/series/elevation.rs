//! Total ascent (D+) for an activity.

use super::normalize::NormalizedSample;
use crate::models::{ElevationSource, SessionSummary};

/// Ascent recorded by the device for the whole session, when usable
pub fn session_ascent(session: Option<&SessionSummary>) -> Option<f64> {
    session
        .and_then(|s| s.enhanced_total_ascent.or(s.total_ascent))
        .filter(|ascent| ascent.is_finite() && *ascent >= 0.0)
}

/// Sum of positive deltas between consecutive valid altitudes, in whole meters.
///
/// Absent and NaN altitudes are skipped before differencing, so a gap does not
/// break the chain. Fewer than two valid points yield `0`.
pub fn gain_from_altitudes<I>(altitudes: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut previous: Option<f64> = None;
    let mut gain = 0.0;

    for altitude in altitudes.into_iter().flatten().filter(|a| a.is_finite()) {
        if let Some(prev) = previous {
            gain += (altitude - prev).max(0.0);
        }
        previous = Some(altitude);
    }

    gain.round()
}

/// Elevation gain, preferring the session figure over the sample profile
pub fn elevation_gain(
    samples: &[NormalizedSample],
    session: Option<&SessionSummary>,
) -> (f64, ElevationSource) {
    match session_ascent(session) {
        Some(ascent) => (ascent, ElevationSource::Session),
        None => (
            gain_from_altitudes(samples.iter().map(|s| s.altitude)),
            ElevationSource::Samples,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_sums_positive_deltas_only() {
        assert_eq!(gain_from_altitudes(profile(&[100.0, 105.0, 102.0, 110.0])), 13.0);
    }

    #[test]
    fn test_descending_and_flat_profiles_are_zero() {
        assert_eq!(gain_from_altitudes(profile(&[300.0, 250.0, 120.0])), 0.0);
        assert_eq!(gain_from_altitudes(profile(&[50.0, 50.0, 50.0])), 0.0);
    }

    #[test]
    fn test_gaps_and_nan_are_skipped() {
        let altitudes = vec![Some(10.0), None, Some(f64::NAN), Some(14.0), None, Some(12.0)];
        assert_eq!(gain_from_altitudes(altitudes), 4.0);
    }

    #[test]
    fn test_insufficient_points() {
        assert_eq!(gain_from_altitudes(Vec::new()), 0.0);
        assert_eq!(gain_from_altitudes(vec![Some(100.0), None]), 0.0);
    }

    #[test]
    fn test_rounds_to_whole_meters() {
        assert_eq!(gain_from_altitudes(profile(&[100.0, 100.4, 100.9])), 1.0);
        assert_eq!(gain_from_altitudes(profile(&[100.0, 100.2])), 0.0);
    }

    #[test]
    fn test_session_ascent_wins() {
        let session = SessionSummary {
            total_ascent: Some(340.0),
            ..Default::default()
        };
        let samples: Vec<NormalizedSample> = [100.0, 110.0]
            .iter()
            .map(|&a| NormalizedSample {
                altitude: Some(a),
                ..Default::default()
            })
            .collect();

        assert_eq!(
            elevation_gain(&samples, Some(&session)),
            (340.0, ElevationSource::Session)
        );
        assert_eq!(
            elevation_gain(&samples, None),
            (10.0, ElevationSource::Samples)
        );
    }

    #[test]
    fn test_enhanced_session_ascent_preferred() {
        let session = SessionSummary {
            total_ascent: Some(340.0),
            enhanced_total_ascent: Some(341.5),
            ..Default::default()
        };
        assert_eq!(session_ascent(Some(&session)), Some(341.5));
    }

    #[test]
    fn test_unusable_session_ascent_falls_back() {
        let session = SessionSummary {
            total_ascent: Some(f64::NAN),
            ..Default::default()
        };
        assert!(session_ascent(Some(&session)).is_none());
        assert!(session_ascent(None).is_none());
    }
}
