//! Live switch and variable state
//!
//! The host owns its switch/variable arrays; the share manager only reads
//! and writes single cells through [`StateStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index-addressable switch (bool) and variable (JSON scalar) cells
pub trait StateStore {
    /// Switch value; unset switches read as `false`
    fn flag(&self, index: u32) -> bool;
    fn set_flag(&mut self, index: u32, value: bool);
    /// Variable value; unset variables read as `0`
    fn counter(&self, index: u32) -> Value;
    fn set_counter(&mut self, index: u32, value: Value);
}

/// In-memory switch/variable store, serializable as a save slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub switches: BTreeMap<u32, bool>,
    #[serde(default)]
    pub variables: BTreeMap<u32, Value>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all cells (new game)
    pub fn clear(&mut self) {
        self.switches.clear();
        self.variables.clear();
    }
}

impl StateStore for GameState {
    fn flag(&self, index: u32) -> bool {
        self.switches.get(&index).copied().unwrap_or(false)
    }

    fn set_flag(&mut self, index: u32, value: bool) {
        self.switches.insert(index, value);
    }

    fn counter(&self, index: u32) -> Value {
        self.variables
            .get(&index)
            .cloned()
            .unwrap_or_else(|| Value::from(0))
    }

    fn set_counter(&mut self, index: u32, value: Value) {
        self.variables.insert(index, value);
    }
}
