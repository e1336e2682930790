// Library interface for runtrace modules
// The CLI, integration tests and benchmarks all go through these exports

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod series;

// Re-export commonly used types for convenience
pub use models::*;
pub use series::{
    derive_activity, derive_activity_with, derive_series, slice_window, window_bounds,
    DerivationConfig, ZoomWindow,
};
pub use import::{ActivityDecoder, CandidatePathResolver, FitDecoder, SourceResolver};
pub use pipeline::{ActivityPipeline, ActivityReport};
pub use export::{ExportFormat, SeriesKind};
pub use config::AppConfig;
pub use error::{RunTraceError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
