//! File backend: `common.rpgsave` below the save directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Backend, StorageError};
use crate::consts::COMMON_SAVE_FILENAME;

/// Shared blob stored as a whole file next to the slot saves
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
    path: PathBuf,
}

impl FileBackend {
    pub fn new(save_dir: impl AsRef<Path>) -> Self {
        let dir = save_dir.as_ref().to_path_buf();
        let path = dir.join(COMMON_SAVE_FILENAME);
        Self { dir, path }
    }

    /// Native default save directory: `<data dir>/common-save/save`,
    /// or `./save` when the platform has no data directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_dir() -> PathBuf {
        match dirs::data_dir() {
            Some(mut path) => {
                path.push("common-save");
                path.push("save");
                path
            }
            None => PathBuf::from("save"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io("create", &self.dir, e))?;
        fs::write(&self.path, blob).map_err(|e| StorageError::io("write", &self.path, e))?;
        log::debug!("Wrote {} bytes to {}", blob.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io("read", &self.path, e)),
        }
    }

    fn exists(&self) -> Result<bool, StorageError> {
        self.path
            .try_exists()
            .map_err(|e| StorageError::io("stat", &self.path, e))
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Removed {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io("remove", &self.path, e)),
        }
    }
}
