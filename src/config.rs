use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::import::parallel::BatchConfig;
use crate::import::CandidatePathResolver;
use crate::logging::LogConfig;
use crate::series::DerivationConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Plausibility bounds used while deriving series
    pub derivation: DerivationConfig,

    /// Where activity files are looked up
    pub storage: StorageSettings,

    /// Logging output
    pub logging: LogConfig,

    /// Parallel batch derivation
    pub batch: BatchConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Activity file storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directories searched, in order, for an activity key
    pub roots: Vec<PathBuf>,

    /// File extensions appended to bare keys
    pub extensions: Vec<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            roots: vec![PathBuf::from("./activities")],
            extensions: vec!["fit".to_string(), "FIT".to_string()],
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".runtrace")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&Self::default_config_path())
    }

    /// Load `path`, falling back to defaults when it is missing or invalid
    pub fn load_or_default_from(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                if path.exists() {
                    warn!("Ignoring unreadable config {}: {:#}", path.display(), err);
                }
                Self::default()
            }
        }
    }

    /// Resolver over the configured storage roots
    pub fn resolver(&self) -> CandidatePathResolver {
        CandidatePathResolver::new(self.storage.roots.clone())
            .with_extensions(self.storage.extensions.clone())
    }
}
