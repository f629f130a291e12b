//! Storage contracts
//!
//! [`SettingsDataSource`] is what the schema binds against. It is synchronous
//! and infallible: a read yields a value or nothing. Stores that are slow or
//! remote go behind [`SettingsBackend`] and are fronted by an in-memory cache
//! (see `infra::storage::CachedDataSource`).
//!
//! Nothing here synchronizes writers. Callers must not write one key from two
//! threads at once without their own coordination.

use crate::contract::SettingValue;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Key-value store the settings tree reads and writes
pub trait SettingsDataSource: Send + Sync {
    /// Whether any value is stored under `key`
    fn has_value(&self, key: &str) -> bool;

    /// Stored value for `key`
    fn get(&self, key: &str) -> Option<SettingValue>;

    /// Store `value` under `key`; `None` removes it
    fn set(&self, key: &str, value: Option<SettingValue>);

    fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| value.as_bool())
    }

    fn float(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(|value| value.as_float())
    }

    fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|value| value.as_int())
    }

    fn string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(SettingValue::String(value)) => Some(value),
            _ => None,
        }
    }
}

/// Persistent store loaded and flushed in bulk
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Read every stored value
    async fn load(&self) -> Result<HashMap<String, SettingValue>>;

    /// Replace the stored contents with `values`
    async fn store(&self, values: &HashMap<String, SettingValue>) -> Result<()>;
}
