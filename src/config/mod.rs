//! Configuration management for storage backend selection and scanner hints.

/// Database configuration and connection management
pub mod database;

use crate::errors::{Error, Result};
use crate::scan::{CaptureConstraints, Facing};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration structure representing the entire config.toml file.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Which storage backend to open and how
    #[serde(default)]
    pub storage: StorageConfig,
    /// Capture-device acquisition hints
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// Storage backend selection.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Backend strategy: `local`, `remote`, or `memory`
    #[serde(default)]
    pub backend: BackendKind,
    /// Key-value file path for the local backend
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Owner identifier for the remote backend's per-user rows
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: default_store_path(),
            owner_id: default_owner_id(),
        }
    }
}

/// The three interchangeable backend strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Unauthenticated key-value file
    #[default]
    Local,
    /// Per-user document collection on the shared database
    Remote,
    /// In-process store, nothing persisted
    Memory,
}

/// Capture-device hints for the scan session.
#[derive(Debug, Deserialize)]
pub struct ScannerConfig {
    /// Preferred device facing: `environment` or `user`
    #[serde(default)]
    pub facing: Facing,
    /// Ideal frame width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Ideal frame height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            facing: Facing::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ScannerConfig {
    /// The acquisition constraints this configuration asks for.
    #[must_use]
    pub const fn constraints(&self) -> CaptureConstraints {
        CaptureConstraints {
            facing: self.facing,
            width: self.width,
            height: self.height,
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/barcode_store.json")
}

fn default_owner_id() -> String {
    "local-user".to_string()
}

const fn default_width() -> u32 {
    640
}

const fn default_height() -> u32 {
    480
}

/// Loads application configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from the default location (./config.toml), falling
/// back to built-in defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_config() -> Result<AppConfig> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(AppConfig::default())
    }
}
