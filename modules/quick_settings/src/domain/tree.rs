//! Validated settings tree

use super::repository::SettingsDataSource;
use super::{resolver, validation};
use crate::contract::{Setting, SettingValue, SettingsError};

/// A settings schema rooted at one node, usually a group
///
/// Built once and shared read-only. Pass it to whatever owns the binding;
/// there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct SettingsTree {
    root: Setting,
}

impl SettingsTree {
    /// Build a tree, rejecting duplicate keys
    pub fn new(root: impl Into<Setting>) -> Result<Self, SettingsError> {
        let root = root.into();
        validation::ensure_unique_keys(&root)?;
        Ok(Self { root })
    }

    /// Build a tree without the duplicate key check
    ///
    /// Lookups on a duplicated key return the first node in pre-order.
    pub fn new_unchecked(root: impl Into<Setting>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Setting {
        &self.root
    }

    pub fn find(&self, key: &str) -> Option<&Setting> {
        resolver::find_by_key(&self.root, key)
    }

    pub fn keys(&self) -> Vec<&str> {
        resolver::keys(&self.root)
    }

    pub fn reset(&self, data_source: &dyn SettingsDataSource) -> Vec<String> {
        resolver::reset(&self.root, data_source)
    }

    pub fn initialize(&self, data_source: &dyn SettingsDataSource) -> Vec<String> {
        resolver::initialize(&self.root, data_source)
    }

    /// Effective value of the node for `key`, if the tree has one
    pub fn effective_value(
        &self,
        key: &str,
        data_source: &dyn SettingsDataSource,
    ) -> Option<SettingValue> {
        self.find(key)
            .and_then(|setting| resolver::effective_value(setting, data_source))
    }
}
