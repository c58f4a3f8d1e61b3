//! Application configuration
//!
//! Loaded from a TOML file where every field is optional. The storage paths
//! can also be overridden through the `UPLOADS_DIR` and `DESIGNS_DIR`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::preview::PreviewConfig;

/// Environment variable overriding [`StorageConfig::uploads_dir`]
pub const UPLOADS_DIR_ENV: &str = "UPLOADS_DIR";

/// Environment variable overriding [`StorageConfig::data_dir`]
pub const DESIGNS_DIR_ENV: &str = "DESIGNS_DIR";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Where uploads and design records live
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory accepted SVG files are written to
    pub uploads_dir: PathBuf,
    /// Directory holding one JSON file per design record
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from("./uploads"),
            data_dir: PathBuf::from("./designs"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply storage overrides from any key lookup; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(UPLOADS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.storage.uploads_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(DESIGNS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        self
    }

    /// Set the uploads directory
    pub fn with_uploads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.uploads_dir = dir.into();
        self
    }

    /// Set the design record directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = dir.into();
        self
    }

    /// Set the preview configuration
    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }
}
