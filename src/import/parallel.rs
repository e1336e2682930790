//! Parallel batch derivation using rayon
//!
//! Each file is an independent decode + derive run; runs share nothing, so the
//! batch only needs to collect per-file outcomes. Typical use is recomputing
//! elevation gain for a whole archive so a caller can write it back.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ActivityDecoder;
use crate::models::ActivityMetrics;
use crate::series::{derive_activity_with, DerivationConfig};

/// Configuration for batch derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of worker threads (rayon default when unset)
    pub num_threads: Option<usize>,
    /// Show progress bar while processing
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            show_progress: true,
        }
    }
}

/// Outcome of one file in a batch
#[derive(Debug, Clone, Serialize)]
pub struct FileDeriveResult {
    pub file_path: PathBuf,
    pub sample_count: usize,
    pub metrics: Option<ActivityMetrics>,
    pub duration_ms: u128,
    pub error: Option<String>,
}

impl FileDeriveResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub total_duration_ms: u128,
    /// Per-file results in input order
    pub results: Vec<FileDeriveResult>,
}

impl BatchSummary {
    fn from_results(results: Vec<FileDeriveResult>, total_duration_ms: u128) -> Self {
        let successful_files = results.iter().filter(|r| r.is_success()).count();
        Self {
            total_files: results.len(),
            successful_files,
            failed_files: results.len() - successful_files,
            total_duration_ms,
            results,
        }
    }

    /// Get throughput (files per second)
    pub fn throughput_files_per_sec(&self) -> f64 {
        if self.total_duration_ms == 0 {
            return 0.0;
        }
        (self.successful_files as f64 / self.total_duration_ms as f64) * 1000.0
    }

    pub fn is_fully_successful(&self) -> bool {
        self.failed_files == 0
    }

    /// Sum of elevation gain across successful files
    pub fn total_elevation_gain_m(&self) -> f64 {
        self.results
            .iter()
            .filter_map(|r| r.metrics.as_ref())
            .map(|m| m.elevation_gain_m)
            .sum()
    }

    /// Sum of distance across successful files
    pub fn total_distance_km(&self) -> f64 {
        self.results
            .iter()
            .filter_map(|r| r.metrics.as_ref())
            .filter_map(|m| m.total_distance_km)
            .sum()
    }

    /// Get human-readable summary
    pub fn to_string_pretty(&self) -> String {
        format!(
            "Batch Derivation Summary\n  \
             Total Files: {}\n  \
             Successful: {}\n  \
             Failed: {}\n  \
             Total Distance: {:.2} km\n  \
             Total Elevation Gain: {:.0} m\n  \
             Total Time: {:.2}s\n  \
             Throughput: {:.2} files/sec",
            self.total_files,
            self.successful_files,
            self.failed_files,
            self.total_distance_km(),
            self.total_elevation_gain_m(),
            self.total_duration_ms as f64 / 1000.0,
            self.throughput_files_per_sec()
        )
    }
}

/// Derives many activities in parallel
pub struct BatchDeriver<D: ActivityDecoder> {
    pub config: BatchConfig,
    derivation: DerivationConfig,
    decoder: D,
}

impl<D: ActivityDecoder> BatchDeriver<D> {
    pub fn new(decoder: D, derivation: DerivationConfig, config: BatchConfig) -> Self {
        Self {
            config,
            derivation,
            decoder,
        }
    }

    /// Derive every decodable file directly inside `dir_path`
    pub fn derive_directory(&self, dir_path: &Path) -> Result<BatchSummary> {
        if !dir_path.is_dir() {
            anyhow::bail!("Path is not a directory: {}", dir_path.display());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir_path)? {
            let path = entry?.path();
            if path.is_file() && self.decoder.can_decode(&path) {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            warn!(
                "No {} files found in directory: {}",
                self.decoder.format_name(),
                dir_path.display()
            );
        } else {
            info!("Found {} {} files in directory", files.len(), self.decoder.format_name());
        }

        self.derive_files(&files)
    }

    /// Derive a list of files; results keep the order of `file_paths`
    pub fn derive_files(&self, file_paths: &[PathBuf]) -> Result<BatchSummary> {
        let start_time = Instant::now();
        info!("Starting batch derivation of {} files", file_paths.len());

        let progress = if self.config.show_progress && !file_paths.is_empty() {
            let pb = ProgressBar::new(file_paths.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({msg})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let run = || -> Vec<FileDeriveResult> {
            file_paths
                .par_iter()
                .map(|path| {
                    let result = self.derive_file(path);
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    result
                })
                .collect()
        };

        let results = match self.config.num_threads {
            Some(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {}", e))?
                .install(run),
            None => run(),
        };

        if let Some(pb) = progress {
            pb.finish_with_message("Complete");
        }

        let summary = BatchSummary::from_results(results, start_time.elapsed().as_millis());
        info!("{}", summary.to_string_pretty());
        Ok(summary)
    }

    fn derive_file(&self, file_path: &Path) -> FileDeriveResult {
        let file_start = Instant::now();

        match self.decoder.decode_file(file_path) {
            Ok(decoded) => {
                let derived = derive_activity_with(
                    &decoded.samples,
                    decoded.session.as_ref(),
                    &self.derivation,
                );
                let duration_ms = file_start.elapsed().as_millis();
                debug!(
                    "Derived {:?} ({} samples, {}ms)",
                    file_path,
                    decoded.samples.len(),
                    duration_ms
                );

                FileDeriveResult {
                    file_path: file_path.to_path_buf(),
                    sample_count: decoded.samples.len(),
                    metrics: Some(derived.metrics),
                    duration_ms,
                    error: None,
                }
            }
            Err(e) => {
                let duration_ms = file_start.elapsed().as_millis();
                warn!("Failed to derive {:?}: {}", file_path, e);

                FileDeriveResult {
                    file_path: file_path.to_path_buf(),
                    sample_count: 0,
                    metrics: None,
                    duration_ms,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
