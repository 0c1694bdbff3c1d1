//! Shared save data persistence
//!
//! - `snapshot`: tracked switch/variable values and their JSON form
//! - `manager`: save/load/exists/remove of the shared blob

pub mod manager;
pub mod snapshot;

pub use manager::ShareManager;
pub use snapshot::Snapshot;
