//! Durable key-value slot storage for PLAYVAULT.
//!
//! Each named slot is one JSON document under the store's root directory.
//! A missing slot is reported as `Ok(None)`, never conflated with an
//! empty or default value; unreadable data surfaces as [`StorageError`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Storage-related errors.
///
/// These indicate that the durable store itself is unavailable or holds
/// unparseable data. Callers decide whether to retry or abort; no retry
/// happens inside the store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing a slot file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A slot file exists but does not deserialize.
    #[error("storage data error: {0}")]
    Data(#[from] serde_json::Error),
}

/// File-backed key-value slot store.
///
/// Keys map to `<root>/<key>.json`. Writes replace the slot atomically
/// (temp file, then rename) so a crash mid-write never leaves a
/// half-written slot behind.
#[derive(Debug, Clone)]
pub struct SlotStore {
    root: PathBuf,
}

impl SlotStore {
    /// Open a slot store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)?;
        }
        debug!("Opened slot store at {:?}", root);
        Ok(Self { root })
    }

    /// Path of the store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether a slot exists. No side effects.
    pub fn exists(&self, key: &str) -> bool {
        self.slot_path(key).is_file()
    }

    /// Load a slot, returning `Ok(None)` if it does not exist.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.slot_path(key);
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| {
            error!("Failed to read slot '{}': {}", key, e);
            e
        })?;
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            error!("Failed to parse slot '{}': {}", key, e);
            e
        })?;
        Ok(Some(value))
    }

    /// Serialize `value` into the slot, replacing any previous contents.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(value)?;
        if let Err(e) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, &path)) {
            error!("Failed to write slot '{}': {}", key, e);
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!("Saved slot '{}' ({} bytes)", key, bytes.len());
        Ok(())
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}
