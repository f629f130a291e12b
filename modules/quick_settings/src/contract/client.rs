//! Client trait for the layer that presents settings
//!
//! A presentation layer reads effective values to configure its controls and
//! writes user edits back through this trait. It owns all rendering and
//! navigation; nothing here refers to it.

use super::{
    error::SettingsError,
    model::{Setting, SettingValue},
};

/// Settings API bound to one tree and one data source
pub trait SettingsApi: Send + Sync {
    /// Find the keyed node for `key`
    fn setting(&self, key: &str) -> Option<Setting>;

    /// Value the node for `key` currently resolves to
    fn effective_value(&self, key: &str) -> Option<SettingValue>;

    /// Store a new value for `key`; `None` clears text settings
    fn set_value(&self, key: &str, value: Option<SettingValue>) -> Result<(), SettingsError>;

    /// Overwrite every key with its default, returning the keys written
    fn reset_settings(&self) -> Vec<String>;

    /// Write defaults for keys with no stored value, returning the keys written
    fn initialize_settings(&self) -> Vec<String>;
}
