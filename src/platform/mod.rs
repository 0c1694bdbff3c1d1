//! Platform storage layer
//!
//! One opaque blob under one fixed location, behind [`Backend`]:
//! - `file`: `common.rpgsave` below the save directory (native)
//! - `kv`: the `RPG Common` key of a key/value store (LocalStorage on web)
//!
//! Backends move the blob around; they never look inside it.

pub mod file;
pub mod kv;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use file::FileBackend;
pub use kv::{KeyValueBackend, KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use kv::WebStorage;

/// Storage failures. A missing blob is not an error.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("key/value storage: {0}")]
    KeyValue(String),
    #[error("failed to encode shared data: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Persistence of the shared blob
pub trait Backend {
    /// Overwrite the blob
    fn save(&mut self, blob: &str) -> Result<(), StorageError>;
    /// Read the blob; `Ok(None)` when nothing was saved yet
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn exists(&self) -> Result<bool, StorageError>;
    /// Delete the blob; deleting a missing blob succeeds
    fn remove(&mut self) -> Result<(), StorageError>;
}

/// Where the blob lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// `common.rpgsave` in the save directory
    LocalFile,
    /// Browser LocalStorage
    WebStorage,
}

impl StorageMode {
    /// Web builds use LocalStorage, everything else the file system
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            StorageMode::WebStorage
        } else {
            StorageMode::LocalFile
        }
    }
}

/// Open the backend for `mode`.
///
/// `save_dir` is only used by [`StorageMode::LocalFile`]. Outside the
/// browser there is no LocalStorage, so web mode falls back to an
/// in-process store.
pub fn open_backend(mode: StorageMode, save_dir: &Path) -> Result<Box<dyn Backend>, StorageError> {
    match mode {
        StorageMode::LocalFile => Ok(Box::new(FileBackend::new(save_dir))),
        StorageMode::WebStorage => open_web_backend(),
    }
}

#[cfg(target_arch = "wasm32")]
fn open_web_backend() -> Result<Box<dyn Backend>, StorageError> {
    Ok(Box::new(KeyValueBackend::new(WebStorage::open()?)))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_web_backend() -> Result<Box<dyn Backend>, StorageError> {
    log::warn!("LocalStorage unavailable on native, using in-memory storage");
    Ok(Box::new(KeyValueBackend::new(MemoryStore::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_native() {
        assert_eq!(StorageMode::detect(), StorageMode::LocalFile);
    }

    #[test]
    fn test_open_backends_start_empty() {
        let dir = tempfile::tempdir().unwrap();
        for mode in [StorageMode::LocalFile, StorageMode::WebStorage] {
            let backend = open_backend(mode, dir.path()).unwrap();
            assert!(!backend.exists().unwrap());
            assert_eq!(backend.load().unwrap(), None);
        }
    }

    #[test]
    fn test_backends_are_interchangeable() {
        let dir = tempfile::tempdir().unwrap();
        for mode in [StorageMode::LocalFile, StorageMode::WebStorage] {
            let mut backend = open_backend(mode, dir.path()).unwrap();
            backend.save("blob-1").unwrap();
            backend.save("blob-2").unwrap();
            assert!(backend.exists().unwrap());
            assert_eq!(backend.load().unwrap().as_deref(), Some("blob-2"));
            backend.remove().unwrap();
            backend.remove().unwrap();
            assert!(!backend.exists().unwrap());
        }
    }
}
