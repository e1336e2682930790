use std::path::Path;

use chrono::Utc;
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use tracing::debug;

use super::ActivityDecoder;
use crate::error::DecodeError;
use crate::models::{DecodedActivity, RawSample, SessionSummary};

/// FIT file decoder for Garmin native format
#[derive(Debug, Clone, Copy, Default)]
pub struct FitDecoder;

impl FitDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Map decoded FIT messages onto samples and the first session summary
    pub fn activity_from_records(records: &[FitDataRecord]) -> DecodedActivity {
        let mut samples = Vec::new();
        let mut session: Option<SessionSummary> = None;

        for record in records {
            match record.kind() {
                MesgNum::Record => {
                    let mut sample = RawSample::default();
                    for field in record.fields() {
                        apply_record_field(&mut sample, field.name(), field.value());
                    }
                    samples.push(sample);
                }
                MesgNum::Session if session.is_none() => {
                    let mut summary = SessionSummary::default();
                    for field in record.fields() {
                        apply_session_field(&mut summary, field.name(), field.value());
                    }
                    session = Some(summary);
                }
                _ => {}
            }
        }

        DecodedActivity { samples, session }
    }
}

impl ActivityDecoder for FitDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedActivity, DecodeError> {
        // fitparser accepts a zero-length buffer as a file with no records
        if bytes.is_empty() {
            return Err(DecodeError::Corrupted {
                reason: "empty FIT payload".to_string(),
            });
        }

        let records = fitparser::from_bytes(bytes).map_err(|err| DecodeError::Corrupted {
            reason: err.to_string(),
        })?;

        let activity = Self::activity_from_records(&records);
        debug!(
            records = records.len(),
            samples = activity.samples.len(),
            has_session = activity.session.is_some(),
            "Decoded FIT payload"
        );
        Ok(activity)
    }

    fn can_decode(&self, file_path: &Path) -> bool {
        file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("fit"))
            .unwrap_or(false)
    }

    fn format_name(&self) -> &'static str {
        "FIT"
    }
}

/// Copy one `record` message field onto a sample
pub fn apply_record_field(sample: &mut RawSample, name: &str, value: &Value) {
    match name {
        "speed" => sample.speed = value_to_f64(value),
        "enhanced_speed" => sample.enhanced_speed = value_to_f64(value),
        "distance" => sample.distance = value_to_f64(value),
        "altitude" => sample.altitude = value_to_f64(value),
        "enhanced_altitude" => sample.enhanced_altitude = value_to_f64(value),
        "heart_rate" => sample.heart_rate = value_to_u16(value),
        "timestamp" => {
            if let Value::Timestamp(ts) = value {
                sample.timestamp = Some(ts.with_timezone(&Utc));
            }
        }
        _ => {}
    }
}

/// Copy one `session` message field onto a summary
pub fn apply_session_field(summary: &mut SessionSummary, name: &str, value: &Value) {
    match name {
        "total_ascent" => summary.total_ascent = value_to_f64(value),
        "avg_heart_rate" => summary.avg_heart_rate = value_to_u16(value),
        "max_heart_rate" => summary.max_heart_rate = value_to_u16(value),
        "total_distance" => summary.total_distance = value_to_f64(value),
        "total_timer_time" => summary.total_timer_time = value_to_f64(value),
        "start_time" => {
            if let Value::Timestamp(ts) = value {
                summary.start_time = Some(ts.with_timezone(&Utc));
            }
        }
        _ => {}
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float64(v) => Some(*v),
        Value::Float32(v) => Some(*v as f64),
        Value::Byte(v) | Value::Enum(v) | Value::UInt8(v) | Value::UInt8z(v) => Some(*v as f64),
        Value::SInt8(v) => Some(*v as f64),
        Value::UInt16(v) | Value::UInt16z(v) => Some(*v as f64),
        Value::SInt16(v) => Some(*v as f64),
        Value::UInt32(v) | Value::UInt32z(v) => Some(*v as f64),
        Value::SInt32(v) => Some(*v as f64),
        Value::UInt64(v) | Value::UInt64z(v) => Some(*v as f64),
        Value::SInt64(v) => Some(*v as f64),
        _ => None,
    }
}

fn value_to_u16(value: &Value) -> Option<u16> {
    value_to_f64(value)
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u16::MAX as f64)
        .map(|v| v.round() as u16)
}
