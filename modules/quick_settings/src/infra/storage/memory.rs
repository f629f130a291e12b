//! In-memory data source

use crate::contract::SettingValue;
use crate::domain::repository::SettingsDataSource;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Data source kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryDataSource {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing values
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, SettingValue)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(key, value)| (key.into(), value))
                    .collect(),
            ),
        }
    }

    /// Get count of stored values
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Copy of every stored value
    pub fn snapshot(&self) -> HashMap<String, SettingValue> {
        self.values.read().clone()
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl SettingsDataSource for InMemoryDataSource {
    fn has_value(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Option<SettingValue>) {
        let mut values = self.values.write();
        match value {
            Some(value) => {
                values.insert(key.to_string(), value);
            }
            None => {
                values.remove(key);
            }
        }
    }
}
