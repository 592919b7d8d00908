//! JSON file key-value store
//!
//! Keeps every record in a single `connections.json` file in the user's data
//! directory. Values are stored as-is; anything secret must already be
//! encrypted by the caller.
//!
//! The file is read on first access, and the cache only changes after the
//! file has been rewritten successfully.

use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::debug;

use super::KeyValueStore;
use crate::error::{ConfigError, Result};

/// Current on-disk format version
const FILE_VERSION: u32 = 1;

/// Durable key-value store backed by a JSON file
pub struct JsonFileStore {
    /// Directory holding the store file
    storage_dir: PathBuf,
    /// In-memory copy of the file contents
    cache: Arc<RwLock<StoreCache>>,
}

#[derive(Debug, Default)]
struct StoreCache {
    entries: BTreeMap<String, String>,
    /// Whether `entries` reflects the file on disk
    loaded: bool,
}

/// File format for persistent storage
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Create a store in the platform data directory
    pub fn new() -> Result<Self> {
        Self::with_dir(Self::default_dir()?)
    }

    /// Create a store in a custom directory
    pub fn with_dir(storage_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&storage_dir)?;

        debug!("JSON file store initialized at: {:?}", storage_dir);

        Ok(Self {
            storage_dir,
            cache: Arc::new(RwLock::new(StoreCache::default())),
        })
    }

    /// Get the default data directory
    pub fn default_dir() -> Result<PathBuf> {
        ProjectDirs::from("com", "symbia-labs", "remote-config")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ConfigError::StorageError("Could not determine data directory".to_string()))
    }

    /// Get the path to the store file
    fn store_file_path(&self) -> PathBuf {
        self.storage_dir.join("connections.json")
    }

    /// Get the storage directory path
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Reload the store from disk, replacing the in-memory contents
    ///
    /// Not required before use; the file is read on first access.
    pub async fn load(&self) -> Result<()> {
        let entries = self.read_file().await?;

        let mut cache = self.cache.write().await;
        cache.entries = entries;
        cache.loaded = true;

        debug!("Loaded {} entries from store", cache.entries.len());
        Ok(())
    }

    async fn read_file(&self) -> Result<BTreeMap<String, String>> {
        let path = self.store_file_path();

        if !path.exists() {
            debug!("No existing store file found");
            return Ok(BTreeMap::new());
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let file: StoreFile = serde_json::from_str(&contents)?;

        if file.version > FILE_VERSION {
            return Err(ConfigError::StorageError(format!(
                "Store file version {} is newer than supported {}",
                file.version, FILE_VERSION
            )));
        }

        Ok(file.entries)
    }

    /// Write lock on the cache, reading the file first if it has not been
    async fn loaded_cache(&self) -> Result<RwLockWriteGuard<'_, StoreCache>> {
        let mut cache = self.cache.write().await;

        if !cache.loaded {
            cache.entries = self.read_file().await?;
            cache.loaded = true;
            debug!("Loaded {} entries from store", cache.entries.len());
        }

        Ok(cache)
    }

    /// Write the given entries to disk atomically
    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let file = StoreFile {
            version: FILE_VERSION,
            entries: entries.clone(),
        };

        let contents = serde_json::to_string_pretty(&file)?;
        let path = self.store_file_path();

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        debug!("Saved {} entries to store", entries.len());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        {
            let cache = self.cache.read().await;
            if cache.loaded {
                return Ok(cache.entries.get(key).cloned());
            }
        }

        let cache = self.loaded_cache().await?;
        Ok(cache.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // Hold the write lock across the save so concurrent writers serialize
        let mut cache = self.loaded_cache().await?;

        let mut entries = cache.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await?;
        cache.entries = entries;

        debug!("Stored key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut cache = self.loaded_cache().await?;

        if !cache.entries.contains_key(key) {
            return Ok(());
        }

        let mut entries = cache.entries.clone();
        entries.remove(key);
        self.save(&entries).await?;
        cache.entries = entries;

        debug!("Deleted key: {}", key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let cache = self.loaded_cache().await?;

        Ok(cache
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "JSON File Store"
    }
}
