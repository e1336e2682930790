//! Integration tests for source lookup, decoding and batch derivation
//!
//! Covers the collaborators in front of the engine:
//! - Candidate path lookup under storage roots
//! - FIT decode failures surfaced as errors
//! - Parallel batch runs over a directory

use runtrace::error::{DecodeError, ResolveError, RunTraceError};
use runtrace::import::parallel::{BatchConfig, BatchDeriver};
use runtrace::{ActivityPipeline, AppConfig, DerivationConfig, FitDecoder};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_missing_activity_lists_candidates() {
    let root = tempdir().unwrap();
    let pipeline =
        ActivityPipeline::fit(vec![root.path().to_path_buf()], DerivationConfig::default());

    match pipeline.load("2024-05-01-long-run") {
        Err(RunTraceError::Resolve(ResolveError::NotFound { candidates, .. })) => {
            assert!(candidates.contains(&root.path().join("2024-05-01-long-run.fit")));
        }
        other => panic!("expected NotFound, got {:?}", other.map(|r| r.source_path)),
    }
}

#[test]
fn test_corrupt_fit_file_is_decode_error() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("broken.fit"), b"not a fit file").unwrap();

    let pipeline =
        ActivityPipeline::fit(vec![root.path().to_path_buf()], DerivationConfig::default());
    let result = pipeline.load("broken");

    let err = result.err().unwrap();
    assert!(matches!(err, RunTraceError::Decode(DecodeError::Corrupted { .. })));
    assert!(err.user_message().contains("corrupted"));
}

#[test]
fn test_config_resolver_finds_activity() {
    let root = tempdir().unwrap();
    let path = root.path().join("tempo.FIT");
    std::fs::write(&path, b"x").unwrap();

    let mut config = AppConfig::default();
    config.storage.roots = vec![PathBuf::from("/nonexistent"), root.path().to_path_buf()];

    use runtrace::SourceResolver;
    assert_eq!(config.resolver().resolve("tempo").unwrap(), path);
}

#[test]
fn test_batch_over_empty_directory() {
    let dir = tempdir().unwrap();
    let deriver = BatchDeriver::new(
        FitDecoder::new(),
        DerivationConfig::default(),
        BatchConfig {
            num_threads: Some(2),
            show_progress: false,
        },
    );

    let summary = deriver.derive_directory(dir.path()).unwrap();
    assert_eq!(summary.total_files, 0);
    assert!(summary.is_fully_successful());
    assert_eq!(summary.throughput_files_per_sec(), 0.0);
}

#[test]
fn test_batch_collects_failures_without_aborting() {
    let dir = tempdir().unwrap();
    for name in ["a.fit", "b.FIT", "c.fit"] {
        std::fs::write(dir.path().join(name), b"garbage").unwrap();
    }
    std::fs::write(dir.path().join("d.fit"), b"").unwrap();
    std::fs::write(dir.path().join("readme.md"), b"skip").unwrap();

    let deriver = BatchDeriver::new(
        FitDecoder::new(),
        DerivationConfig::default(),
        BatchConfig {
            num_threads: None,
            show_progress: false,
        },
    );
    let summary = deriver.derive_directory(dir.path()).unwrap();

    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.failed_files, 4);
    assert!(summary.results.iter().all(|r| r.metrics.is_none()));

    let empty = summary
        .results
        .iter()
        .find(|r| r.file_path.ends_with("d.fit"))
        .unwrap();
    assert!(empty.error.as_deref().unwrap().contains("empty FIT payload"));
}
