//! Share manager
//!
//! Owns the share settings and the blob backend. Reads tracked cells from
//! the live state on save and writes stored cells back on load. Nothing in
//! here is fatal to the host: storage and decode failures are logged and
//! degrade to "nothing restored".

use std::cell::RefCell;
use std::path::Path;

use super::snapshot::Snapshot;
use crate::codec;
use crate::consts::SIZE_WARNING_THRESHOLD;
use crate::lifecycle::{LifecycleEvent, LifecycleHook};
use crate::platform::{self, Backend, StorageError, StorageMode};
use crate::settings::ShareSettings;
use crate::state::StateStore;

/// Shared save data for one process.
///
/// Construct once at startup and hand out references; the backend sits in a
/// `RefCell` so lifecycle hooks can save through `&self`.
pub struct ShareManager {
    settings: ShareSettings,
    backend: RefCell<Box<dyn Backend>>,
}

impl ShareManager {
    pub fn new(settings: ShareSettings, backend: Box<dyn Backend>) -> Self {
        Self {
            settings,
            backend: RefCell::new(backend),
        }
    }

    pub fn with_backend(settings: ShareSettings, backend: impl Backend + 'static) -> Self {
        Self::new(settings, Box::new(backend))
    }

    /// Open the backend for `mode` (see [`platform::open_backend`])
    pub fn open(
        settings: ShareSettings,
        mode: StorageMode,
        save_dir: &Path,
    ) -> Result<Self, StorageError> {
        Ok(Self::new(settings, platform::open_backend(mode, save_dir)?))
    }

    pub fn is_auto(&self) -> bool {
        self.settings.auto_sync
    }

    /// Tracked cells of `state`
    pub fn snapshot<S: StateStore + ?Sized>(&self, state: &S) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for &index in &self.settings.target_flags {
            snapshot.insert_flag(index, state.flag(index));
        }
        for &index in &self.settings.target_counters {
            snapshot.insert_counter(index, state.counter(index));
        }
        snapshot
    }

    /// Write every entry of `snapshot` into `state`, returning how many
    /// cells were set. Entries whose key is not an index are skipped.
    pub fn apply<S: StateStore + ?Sized>(&self, snapshot: &Snapshot, state: &mut S) -> usize {
        let mut applied = 0;
        for (key, &value) in &snapshot.flags {
            if let Some(index) = parse_key(key) {
                state.set_flag(index, value);
                applied += 1;
            }
        }
        for (key, value) in &snapshot.counters {
            if let Some(index) = parse_key(key) {
                state.set_counter(index, value.clone());
                applied += 1;
            }
        }
        applied
    }

    /// Save tracked cells to the shared blob, replacing what was there
    pub fn save<S: StateStore + ?Sized>(&self, state: &S) -> Result<(), StorageError> {
        log::info!("Saving common save data");

        let json = self.snapshot(state).to_json()?;
        let length = json.encode_utf16().count();
        if length >= SIZE_WARNING_THRESHOLD {
            log::warn!("Common save data is too big ({} characters)", length);
        }

        self.backend.borrow_mut().save(&codec::compress(&json))
    }

    /// Restore stored cells into `state`.
    ///
    /// Returns `false` without touching `state` when there is no shared
    /// blob. An unreadable blob restores nothing.
    pub fn load<S: StateStore + ?Sized>(&self, state: &mut S) -> bool {
        log::info!("Loading common save data");

        if !self.exists() {
            log::debug!("No common save data");
            return false;
        }

        let snapshot = self.read_snapshot();
        let applied = self.apply(&snapshot, state);
        log::info!("Restored {} shared values", applied);
        true
    }

    /// Whether a shared blob exists. Query only.
    pub fn exists(&self) -> bool {
        match self.backend.borrow().exists() {
            Ok(exists) => exists,
            Err(e) => {
                log::error!("Could not check common save data: {}", e);
                false
            }
        }
    }

    /// Delete the shared blob; succeeds when there is none
    pub fn remove(&self) -> Result<(), StorageError> {
        log::info!("Removing common save data");
        self.backend.borrow_mut().remove()
    }

    fn read_snapshot(&self) -> Snapshot {
        let blob = match self.backend.borrow().load() {
            Ok(blob) => blob,
            Err(e) => {
                log::error!("Could not read common save data: {}", e);
                return Snapshot::new();
            }
        };

        match codec::decompress(blob.as_deref()) {
            Some(json) => Snapshot::from_json(&json),
            None => {
                log::warn!("Common save data could not be decompressed");
                Snapshot::new()
            }
        }
    }
}

/// Auto-sync: reload shared values after a slot load or new game, store
/// them after a slot save
impl LifecycleHook for ShareManager {
    fn after(&self, event: LifecycleEvent, state: &mut dyn StateStore) {
        if !self.is_auto() {
            return;
        }
        match event {
            LifecycleEvent::LoadSlot | LifecycleEvent::NewGame => {
                self.load(state);
            }
            LifecycleEvent::SaveSlot => {
                if let Err(e) = self.save(&*state) {
                    log::error!("Auto-save of common save data failed: {}", e);
                }
            }
        }
    }
}

fn parse_key(key: &str) -> Option<u32> {
    let index = key.parse().ok();
    if index.is_none() {
        log::warn!("Skipping shared entry with invalid index {:?}", key);
    }
    index
}
