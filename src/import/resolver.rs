//! Turns an activity key into one canonical file path.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ResolveError;

/// Lookup of the file backing an activity
pub trait SourceResolver: Send + Sync {
    fn resolve(&self, key: &str) -> Result<PathBuf, ResolveError>;
}

/// Tries a fixed list of candidate locations and returns the first that exists.
///
/// Order: the key as a literal path, then for every root `root/key` followed by
/// `root/key.<ext>` for each configured extension (only when the key has no
/// extension of its own).
#[derive(Debug, Clone)]
pub struct CandidatePathResolver {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl Default for CandidatePathResolver {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CandidatePathResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            extensions: vec!["fit".to_string(), "FIT".to_string()],
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Every location tried for `key`, in lookup order
    pub fn candidates(&self, key: &str) -> Vec<PathBuf> {
        let key_path = Path::new(key);
        let mut candidates = vec![key_path.to_path_buf()];

        if key_path.is_absolute() {
            return candidates;
        }

        let has_extension = key_path.extension().is_some();
        for root in &self.roots {
            candidates.push(root.join(key_path));
            if !has_extension {
                for ext in &self.extensions {
                    candidates.push(root.join(format!("{}.{}", key, ext)));
                }
            }
        }

        let mut seen = std::collections::HashSet::new();
        candidates.retain(|path| seen.insert(path.clone()));
        candidates
    }
}

impl SourceResolver for CandidatePathResolver {
    fn resolve(&self, key: &str) -> Result<PathBuf, ResolveError> {
        if key.trim().is_empty() {
            return Err(ResolveError::InvalidKey {
                key: key.to_string(),
            });
        }

        let candidates = self.candidates(key);
        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            debug!(key, path = %found.display(), "Resolved activity source");
            return Ok(found.clone());
        }

        warn!(key, tried = candidates.len(), "No file found for activity source");
        Err(ResolveError::NotFound {
            key: key.to_string(),
            candidates,
        })
    }
}
