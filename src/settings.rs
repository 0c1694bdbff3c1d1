//! Share settings
//!
//! Which switches and variables are shared, and whether the shared blob
//! follows slot save/load automatically. Parsed once at startup from the
//! plugin parameters.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{
    PARAM_IS_AUTO, PARAM_TARGET_SWITCHES, PARAM_TARGET_VARIABLES, PARAM_TARGET_VARIABLES_LEGACY,
};

/// Read-only key/value string source for plugin parameters
pub trait ParameterSource {
    fn parameter(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParameterSource for HashMap<String, String, S> {
    fn parameter(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn parameter(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Plugin parameters as the host stores them: a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginParameters(BTreeMap<String, String>);

impl PluginParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of parameters.
    ///
    /// Values are normally strings; other scalars are stringified and nulls
    /// are dropped so `{"Is Auto": true}` still reads as `"true"`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let params = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect();
        Ok(Self(params))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl ParameterSource for PluginParameters {
    fn parameter(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Typed share configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    /// Switch indices written to the shared blob
    pub target_flags: Vec<u32>,
    /// Variable indices written to the shared blob
    pub target_counters: Vec<u32>,
    /// Load/save the shared blob around slot load, slot save and new game
    pub auto_sync: bool,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            target_flags: Vec::new(),
            target_counters: Vec::new(),
            auto_sync: true,
        }
    }
}

impl ShareSettings {
    /// Build settings from plugin parameters. Never fails: bad index tokens
    /// are logged and skipped, missing keys fall back to defaults.
    pub fn from_parameters(source: &impl ParameterSource) -> Self {
        let switches = source.parameter(PARAM_TARGET_SWITCHES).unwrap_or_default();
        let variables = source
            .parameter(PARAM_TARGET_VARIABLES)
            .or_else(|| source.parameter(PARAM_TARGET_VARIABLES_LEGACY))
            .unwrap_or_default();

        let settings = Self {
            target_flags: parse_index_list(switches),
            target_counters: parse_index_list(variables),
            auto_sync: source.parameter(PARAM_IS_AUTO).map_or(true, parse_auto_flag),
        };

        log::info!(
            "Share settings: {} switches, {} variables, auto={}",
            settings.target_flags.len(),
            settings.target_counters.len(),
            settings.auto_sync
        );
        settings
    }

    pub fn is_empty(&self) -> bool {
        self.target_flags.is_empty() && self.target_counters.is_empty()
    }
}

/// Only the exact text `true` turns auto-sync on; `" true"` does not
pub fn parse_auto_flag(raw: &str) -> bool {
    raw == "true"
}

/// Parse a comma-separated list of indices, e.g. `"11,12,13"`.
///
/// Each token is read like a lenient integer parse: leading whitespace and
/// an optional `+` are skipped and the leading run of digits is taken, so
/// `" 12abc"` yields 12. Tokens without leading digits are logged and
/// dropped. A blank string is an empty list.
pub fn parse_index_list(raw: &str) -> Vec<u32> {
    if raw.trim().is_empty() || raw == "undefined" {
        return Vec::new();
    }

    raw.split(',')
        .filter_map(|token| {
            let index = parse_index_token(token);
            if index.is_none() {
                log::warn!("Ignoring invalid index {:?} in {:?}", token, raw);
            }
            index
        })
        .collect()
}

fn parse_index_token(token: &str) -> Option<u32> {
    let token = token.trim_start();
    let token = token.strip_prefix('+').unwrap_or(token);
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_list_skips_invalid() {
        assert_eq!(parse_index_list("1,x,3"), vec![1, 3]);
    }

    #[test]
    fn test_parse_index_list_blank() {
        assert!(parse_index_list("").is_empty());
        assert!(parse_index_list("   ").is_empty());
        assert!(parse_index_list("undefined").is_empty());
    }

    #[test]
    fn test_parse_index_list_lenient_tokens() {
        assert_eq!(parse_index_list(" 11, 12 ,+13,14abc"), vec![11, 12, 13, 14]);
        // Negative and empty tokens are not indices
        assert_eq!(parse_index_list("-3,,5,"), vec![5]);
    }

    #[test]
    fn test_parse_index_list_keeps_duplicates_in_order() {
        assert_eq!(parse_index_list("4,2,4"), vec![4, 2, 4]);
    }

    #[test]
    fn test_parse_auto_flag() {
        assert!(parse_auto_flag("true"));
        assert!(!parse_auto_flag(" true "));
        assert!(!parse_auto_flag("false"));
        assert!(!parse_auto_flag("TRUE"));
        assert!(!parse_auto_flag("1"));
    }

    #[test]
    fn test_from_parameters_defaults() {
        let settings = ShareSettings::from_parameters(&HashMap::<String, String>::new());
        assert_eq!(settings, ShareSettings::default());
        assert!(settings.auto_sync);
        assert!(settings.is_empty());
    }

    #[test]
    fn test_from_parameters_reads_all_keys() {
        let mut params = BTreeMap::new();
        params.insert(PARAM_TARGET_SWITCHES.to_string(), "1,2".to_string());
        params.insert(PARAM_TARGET_VARIABLES.to_string(), "5".to_string());
        params.insert(PARAM_IS_AUTO.to_string(), "false".to_string());

        let settings = ShareSettings::from_parameters(&params);
        assert_eq!(settings.target_flags, vec![1, 2]);
        assert_eq!(settings.target_counters, vec![5]);
        assert!(!settings.auto_sync);
    }

    #[test]
    fn test_from_parameters_legacy_variables_key() {
        let mut params = PluginParameters::new();
        params.set(PARAM_TARGET_VARIABLES_LEGACY, "7,8");
        let settings = ShareSettings::from_parameters(&params);
        assert_eq!(settings.target_counters, vec![7, 8]);
    }

    #[test]
    fn test_plugin_parameters_from_json() {
        let params = PluginParameters::from_json(
            r#"{"Target Switches": "11,12", "Is Auto": false, "Target Variables": null}"#,
        )
        .unwrap();
        assert_eq!(params.parameter(PARAM_TARGET_SWITCHES), Some("11,12"));
        assert_eq!(params.parameter(PARAM_IS_AUTO), Some("false"));
        assert_eq!(params.parameter(PARAM_TARGET_VARIABLES), None);
    }

    #[test]
    fn test_plugin_parameters_rejects_non_object() {
        assert!(PluginParameters::from_json("[1, 2]").is_err());
    }
}
