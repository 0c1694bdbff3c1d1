//! Snapshot of the shared switches and variables
//!
//! Wire shape (before compression):
//! `{"gameSwitches": {"1": true}, "gameVariables": {"5": 42}}`

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

const SWITCHES_KEY: &str = "gameSwitches";
const VARIABLES_KEY: &str = "gameVariables";
/// Variables key as older blobs spell it
const VARIABLES_KEY_LEGACY: &str = "gameValiables";

/// Tracked switch and variable values keyed by decimal index
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(rename = "gameSwitches")]
    pub flags: BTreeMap<String, bool>,
    #[serde(rename = "gameVariables")]
    pub counters: BTreeMap<String, Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.counters.is_empty()
    }

    pub fn insert_flag(&mut self, index: u32, value: bool) {
        self.flags.insert(index.to_string(), value);
    }

    pub fn insert_counter(&mut self, index: u32, value: Value) {
        self.counters.insert(index.to_string(), value);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Lenient parse of stored JSON.
    ///
    /// Malformed text or a non-object root gives an empty snapshot. Unknown
    /// top-level keys are ignored, a missing category is empty, and switch
    /// entries that are not booleans are dropped.
    pub fn from_json(text: &str) -> Self {
        let root = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(root)) => root,
            Ok(other) => {
                log::warn!("Shared data is not an object ({}), ignoring", type_name(&other));
                return Self::new();
            }
            Err(e) => {
                log::error!("Shared data is not valid JSON: {}", e);
                return Self::new();
            }
        };

        let mut snapshot = Self::new();

        if let Some(switches) = category(&root, SWITCHES_KEY) {
            for (key, value) in switches {
                match value.as_bool() {
                    Some(flag) => {
                        snapshot.flags.insert(key.clone(), flag);
                    }
                    None => log::warn!("Skipping switch {} with non-boolean value {}", key, value),
                }
            }
        }

        let variables =
            category(&root, VARIABLES_KEY).or_else(|| category(&root, VARIABLES_KEY_LEGACY));
        if let Some(variables) = variables {
            snapshot.counters.extend(variables.clone());
        }

        snapshot
    }
}

fn category<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    match root.get(key)? {
        Value::Object(entries) => Some(entries),
        other => {
            log::warn!("Shared data {} is {}, expected an object", key, type_name(other));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
