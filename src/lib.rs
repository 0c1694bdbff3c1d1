//! Common Save - shared switches and variables across save slots
//!
//! Core modules:
//! - `settings`: Tracked indices and auto-sync flag, parsed from plugin parameters
//! - `state`: Live switch/variable store abstraction
//! - `codec`: LZ-String compression of the shared blob
//! - `platform`: File and LocalStorage backends
//! - `persistence`: Snapshot building and the share manager
//! - `lifecycle`: Post-hooks around slot save/load and new game
//! - `command`: `CommonSave` plugin command dispatch

pub mod codec;
pub mod command;
pub mod lifecycle;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod state;

pub use command::{Command, CommandOutcome, dispatch};
pub use lifecycle::{Lifecycle, LifecycleEvent, LifecycleHook};
pub use persistence::{ShareManager, Snapshot};
pub use platform::{Backend, FileBackend, KeyValueBackend, MemoryStore, StorageError, StorageMode};
pub use settings::{ParameterSource, PluginParameters, ShareSettings};
pub use state::{GameState, StateStore};

/// Shared blob constants
pub mod consts {
    /// File name of the shared blob below the save directory
    pub const COMMON_SAVE_FILENAME: &str = "common.rpgsave";
    /// LocalStorage key of the shared blob
    pub const WEB_STORAGE_KEY: &str = "RPG Common";
    /// Serialized JSON length at which a save logs a size warning (advisory only)
    pub const SIZE_WARNING_THRESHOLD: usize = 200_000;
    /// Plugin command name
    pub const PLUGIN_COMMAND: &str = "CommonSave";

    /// Plugin parameter keys
    pub const PARAM_TARGET_SWITCHES: &str = "Target Switches";
    pub const PARAM_TARGET_VARIABLES: &str = "Target Variables";
    /// Misspelled key some plugin configs still carry
    pub const PARAM_TARGET_VARIABLES_LEGACY: &str = "Target Valiables";
    pub const PARAM_IS_AUTO: &str = "Is Auto";
}
