//! Configuration for the quick settings module

use crate::contract::SettingsError;
use serde::Deserialize;
use std::path::PathBuf;

/// Quick settings configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Refuse trees in which two settings share a key
    #[serde(default = "default_true")]
    pub reject_duplicate_keys: bool,

    /// Seed missing keys with defaults when the module opens
    #[serde(default = "default_true")]
    pub initialize_on_start: bool,

    /// Check kind, range and options of written values
    #[serde(default = "default_true")]
    pub validate_writes: bool,

    /// JSON file backing the store; in-memory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Capacity of the change event channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reject_duplicate_keys: true,
            initialize_on_start: true,
            validate_writes: true,
            store_path: None,
            event_capacity: default_event_capacity(),
        }
    }
}

impl Config {
    /// Parse configuration from YAML
    pub fn from_yaml(source: &str) -> Result<Self, SettingsError> {
        serde_yaml::from_str(source).map_err(|e| SettingsError::Config(e.to_string()))
    }
}

fn default_true() -> bool {
    true
}

fn default_event_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let config = Config::from_yaml(
            "store_path: /tmp/settings.json\ninitialize_on_start: false\nevent_capacity: 8\n",
        )
        .unwrap();
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/settings.json")));
        assert!(!config.initialize_on_start);
        assert!(config.reject_duplicate_keys);
        assert_eq!(config.event_capacity, 8);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_yaml("strict_mode: true\n");
        assert!(matches!(result, Err(SettingsError::Config(_))));
    }
}
