//! Collaborators that feed the derivation engine: source lookup, file
//! decoding and batch processing.
//!
//! The engine only ever sees a decoded sample list. Everything that can fail
//! (missing files, corrupt payloads) is resolved here and surfaced as a
//! `Result` before derivation starts.

use std::path::Path;

use crate::error::DecodeError;
use crate::models::DecodedActivity;

pub mod fit;
pub mod parallel;
pub mod resolver;

pub use fit::FitDecoder;
pub use resolver::{CandidatePathResolver, SourceResolver};

/// Request/response boundary around a workout file parser
pub trait ActivityDecoder: Send + Sync {
    /// Decode an in-memory workout file
    fn decode(&self, bytes: &[u8]) -> Result<DecodedActivity, DecodeError>;

    /// Check if this decoder handles the given file
    fn can_decode(&self, file_path: &Path) -> bool;

    /// Get the format name for this decoder
    fn format_name(&self) -> &'static str;

    /// Read and decode a workout file from disk
    fn decode_file(&self, file_path: &Path) -> Result<DecodedActivity, DecodeError> {
        let bytes = std::fs::read(file_path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => DecodeError::FileNotFound {
                path: file_path.to_path_buf(),
            },
            _ => DecodeError::Read {
                path: file_path.to_path_buf(),
                source: err,
            },
        })?;
        self.decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawSample;

    struct FixedDecoder;

    impl ActivityDecoder for FixedDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedActivity, DecodeError> {
            Ok(DecodedActivity {
                samples: vec![RawSample::default().with_distance(bytes.len() as f64)],
                session: None,
            })
        }

        fn can_decode(&self, _file_path: &Path) -> bool {
            true
        }

        fn format_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_decode_file_missing() {
        let result = FixedDecoder.decode_file(Path::new("/nonexistent/run.fit"));
        assert!(matches!(result, Err(DecodeError::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_file_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let decoded = FixedDecoder.decode_file(&path).unwrap();
        assert_eq!(decoded.samples[0].distance, Some(3.0));
    }
}
