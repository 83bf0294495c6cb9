//! Flat key-value file backing the local storage variant.
//!
//! A single JSON object of string values on disk, read and rewritten whole on
//! each access. This mirrors the persisted format of the browser original: a
//! handful of fixed keys, each holding a string-encoded value. A missing file
//! reads as empty.

use crate::errors::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Handle to the key-value file. Cheap to clone; all state lives on disk.
#[derive(Debug, Clone)]
pub struct KvFile {
    path: PathBuf,
}

impl KvFile {
    /// Creates a handle for the given path. The file is created lazily on
    /// first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let contents = serde_json::to_string_pretty(map)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }

    /// Retrieves the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.read_map().await?.remove(key);
        debug!("kv get '{}': {} ", key, value.is_some());
        Ok(value)
    }

    /// Sets or updates the value under `key` (upsert).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or rewritten.
    #[instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    /// Removes `key` if present; removing an absent key is a no-op.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or rewritten.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}
