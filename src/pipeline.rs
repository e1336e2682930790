//! Resolve, decode and derive one activity.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::import::{ActivityDecoder, CandidatePathResolver, FitDecoder, SourceResolver};
use crate::models::{DerivedActivity, SessionSummary};
use crate::series::{derive_activity_with, DerivationConfig};

/// Everything known about one derived activity
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub source_path: PathBuf,
    pub sample_count: usize,
    pub session: Option<SessionSummary>,
    #[serde(flatten)]
    pub derived: DerivedActivity,
}

/// Wires a resolver and a decoder in front of the derivation engine
pub struct ActivityPipeline<R: SourceResolver, D: ActivityDecoder> {
    resolver: R,
    decoder: D,
    config: DerivationConfig,
}

impl ActivityPipeline<CandidatePathResolver, FitDecoder> {
    /// FIT files looked up under `roots`
    pub fn fit(roots: Vec<PathBuf>, config: DerivationConfig) -> Self {
        Self::new(CandidatePathResolver::new(roots), FitDecoder::new(), config)
    }
}

impl<R: SourceResolver, D: ActivityDecoder> ActivityPipeline<R, D> {
    pub fn new(resolver: R, decoder: D, config: DerivationConfig) -> Self {
        Self {
            resolver,
            decoder,
            config,
        }
    }

    pub fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Resolve `key`, decode the file and derive its series.
    ///
    /// Lookup and decode failures are returned before any derivation runs.
    pub fn load(&self, key: &str) -> Result<ActivityReport> {
        let source_path = self.resolver.resolve(key)?;
        let decoded = self.decoder.decode_file(&source_path)?;

        let derived =
            derive_activity_with(&decoded.samples, decoded.session.as_ref(), &self.config);

        info!(
            source = %source_path.display(),
            samples = decoded.samples.len(),
            elevation_gain_m = derived.metrics.elevation_gain_m,
            "Derived activity"
        );

        Ok(ActivityReport {
            source_path,
            sample_count: decoded.samples.len(),
            session: decoded.session,
            derived,
        })
    }
}
