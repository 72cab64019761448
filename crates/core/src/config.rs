//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the core
//! services. Nothing in this crate reads environment variables while handling a
//! request.

use crate::store::{FileStore, MemoryStore, Store};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where records are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local maps; everything is lost on exit.
    Memory,
    /// One JSON document per record under the given directory.
    Files(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    storage: StorageConfig,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if a file-backed data directory path is
    /// empty or names an existing non-directory.
    pub fn new(storage: StorageConfig) -> CoreResult<Self> {
        if let StorageConfig::Files(dir) = &storage {
            if dir.as_os_str().is_empty() {
                return Err(CoreError::InvalidInput(
                    "data directory cannot be empty".into(),
                ));
            }
            if dir.exists() && !dir.is_dir() {
                return Err(CoreError::InvalidInput(format!(
                    "data directory is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(Self { storage })
    }

    /// Configuration for a memory-backed store.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageConfig::Memory,
        }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// The data directory, when records are file-backed.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.storage {
            StorageConfig::Memory => None,
            StorageConfig::Files(dir) => Some(dir),
        }
    }

    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Store`] if the data directory cannot be created.
    pub fn open_store(&self) -> CoreResult<Arc<dyn Store>> {
        match &self.storage {
            StorageConfig::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageConfig::Files(dir) => Ok(Arc::new(FileStore::open(dir.clone())?)),
        }
    }
}

/// Interpret an optional data-directory setting.
///
/// `None` or a blank value selects the memory store.
pub fn storage_from_env_value(value: Option<String>) -> StorageConfig {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| StorageConfig::Files(PathBuf::from(v)))
        .unwrap_or(StorageConfig::Memory)
}
