use crate::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export any serializable data structure to pretty JSON
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<(), ExportError>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let json_data = serde_json::to_string_pretty(data)?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityMetrics, ElevationSource};
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_metrics() {
        let metrics = ActivityMetrics {
            elevation_gain_m: 340.0,
            elevation_source: ElevationSource::Session,
            avg_heart_rate_bpm: Some(148),
            ..Default::default()
        };

        let temp_file = NamedTempFile::new().unwrap();
        export_json(&metrics, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["elevation_gain_m"], 340.0);
        assert_eq!(value["elevation_source"], "session");
        assert_eq!(value["avg_heart_rate_bpm"], 148);
        assert!(value["total_distance_km"].is_null());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let result = export_json(&1u8, "/nonexistent-dir/out.json");
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
