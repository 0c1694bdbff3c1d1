//! Key/value backend: the `RPG Common` entry of LocalStorage

use std::collections::HashMap;

use super::{Backend, StorageError};
use crate::consts::WEB_STORAGE_KEY;

/// String key/value store with LocalStorage semantics
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store (native hosts, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct WebStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl WebStorage {
    pub fn open() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|storage| Self { storage })
            .ok_or_else(|| StorageError::KeyValue("LocalStorage is not available".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::KeyValue(format!("{:?}", e))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// Shared blob kept under a single key of a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct KeyValueBackend<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyValueBackend<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, WEB_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> Backend for KeyValueBackend<S> {
    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        self.store.set_item(&self.key, blob)
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        self.store.get_item(&self.key)
    }

    // An empty value counts as absent
    fn exists(&self) -> Result<bool, StorageError> {
        Ok(self
            .store
            .get_item(&self.key)?
            .is_some_and(|blob| !blob.is_empty()))
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        self.store.remove_item(&self.key)
    }
}
