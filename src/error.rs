//! Unified error hierarchy for runtrace
//!
//! The derivation engine itself never fails; these errors come from the
//! collaborators around it (source lookup, decoding, export, configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all runtrace operations
#[derive(Debug, Error)]
pub enum RunTraceError {
    /// Workout file decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Source lookup errors
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Workout file decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File is corrupted or not a workout file
    #[error("Corrupted file: {reason}")]
    Corrupted { reason: String },

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source lookup errors
#[derive(Debug, Error)]
pub enum ResolveError {
    /// None of the candidate paths exists
    #[error("No file found for '{key}' (tried {} candidates)", .candidates.len())]
    NotFound { key: String, candidates: Vec<PathBuf> },

    /// Empty or unusable key
    #[error("Invalid source key: '{key}'")]
    InvalidKey { key: String },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Unsupported format
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

/// Result type alias for runtrace operations
pub type Result<T> = std::result::Result<T, RunTraceError>;

impl RunTraceError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RunTraceError::Resolve(_) => ErrorSeverity::Warning,
            RunTraceError::Decode(DecodeError::FileNotFound { .. }) => ErrorSeverity::Warning,
            RunTraceError::Configuration(_) => ErrorSeverity::Warning,
            RunTraceError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RunTraceError::Resolve(ResolveError::NotFound { key, .. }) => {
                format!("Could not find a workout file for '{}'", key)
            }
            RunTraceError::Decode(DecodeError::FileNotFound { path }) => {
                format!("Could not find workout file: {}", path.display())
            }
            RunTraceError::Decode(DecodeError::Corrupted { reason }) => {
                format!("Workout file is corrupted: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical error requiring immediate attention
    Critical,
    /// Error that prevents the operation
    Error,
    /// Warning that doesn't prevent other operations
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = RunTraceError::Resolve(ResolveError::NotFound {
            key: "morning-run".to_string(),
            candidates: vec![PathBuf::from("morning-run.fit")],
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = RunTraceError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = RunTraceError::Decode(DecodeError::Corrupted {
            reason: "bad header".to_string(),
        });
        assert!(err.user_message().contains("corrupted"));

        let err = RunTraceError::Resolve(ResolveError::NotFound {
            key: "abc".to_string(),
            candidates: Vec::new(),
        });
        assert!(err.user_message().contains("'abc'"));
    }

    #[test]
    fn test_not_found_lists_candidate_count() {
        let err = ResolveError::NotFound {
            key: "run".to_string(),
            candidates: vec![PathBuf::from("a"), PathBuf::from("b")],
        };
        assert!(err.to_string().contains("2 candidates"));
    }
}
