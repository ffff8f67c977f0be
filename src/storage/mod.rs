//! Persisted collections
//!
//! Collections are stored as whole JSON documents under fixed keys. A
//! [`KeyValueStore`] only knows how to read and overwrite such documents; the
//! repositories in [`repository`] decide what to do when a document is
//! missing or unreadable.

pub mod repository;

pub use repository::{ApiRepository, CallLogRepository, Repository};

use rustc_hash::FxHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::core::constants::storage_keys;
use crate::core::error::{CatalogError, Result};

/// Whole-value key/value storage.
///
/// `set` replaces the stored value entirely; a reader never sees a partially
/// written value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Directory-backed store with one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
        if key.is_empty() || !key.chars().all(valid_char) {
            return Err(CatalogError::Storage(format!(
                "Invalid storage key '{key}'. Expected letters, digits, '_' or '-'"
            )));
        }
        let file_name = format!("{key}.{}", storage_keys::FILE_EXTENSION);
        Ok(self.root.join(file_name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(CatalogError::Storage(format!("Could not read '{}': {}", path.display(), e)))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            CatalogError::Storage(format!(
                "Could not create data directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        // Write next to the target and rename so the old value stays intact
        // if the write is interrupted.
        let tmp = path.with_extension(format!("{}.tmp", storage_keys::FILE_EXTENSION));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path).map_err(|e| {
            CatalogError::Storage(format!("Could not replace '{}': {}", path.display(), e))
        })?;
        Ok(())
    }
}

/// In-memory store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<FxHashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, FxHashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| CatalogError::Storage("In-memory store is poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
