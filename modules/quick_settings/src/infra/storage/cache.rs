//! Synchronous cache in front of an asynchronous backend
//!
//! The settings tree only ever sees the cache. Loading and flushing are
//! explicit async calls made by the owner, typically at startup and when
//! the app goes to background.

use crate::contract::SettingValue;
use crate::domain::repository::{SettingsBackend, SettingsDataSource};
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Data source serving reads and writes from memory, persisted on `flush`
pub struct CachedDataSource {
    backend: Arc<dyn SettingsBackend>,
    values: RwLock<HashMap<String, SettingValue>>,
    dirty: AtomicBool,
}

impl CachedDataSource {
    /// Create an empty cache; call [`CachedDataSource::load`] to fill it
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            values: RwLock::new(HashMap::new()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Create a cache filled from `backend`
    pub async fn open(backend: Arc<dyn SettingsBackend>) -> Result<Self> {
        let cache = Self::new(backend);
        cache.load().await?;
        Ok(cache)
    }

    /// Replace the cache with the backend's contents, discarding unflushed writes
    pub async fn load(&self) -> Result<usize> {
        let values = self.backend.load().await?;
        let count = values.len();
        *self.values.write() = values;
        self.dirty.store(false, Ordering::SeqCst);
        tracing::info!(count, "loaded settings from backend");
        Ok(count)
    }

    /// Write the cache to the backend if anything changed since the last load or flush
    ///
    /// Returns whether a write happened.
    pub async fn flush(&self) -> Result<bool> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }

        let snapshot = self.values.read().clone();
        if let Err(e) = self.backend.store(&snapshot).await {
            self.dirty.store(true, Ordering::SeqCst);
            return Err(e);
        }
        tracing::info!(count = snapshot.len(), "flushed settings to backend");
        Ok(true)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }
}

impl SettingsDataSource for CachedDataSource {
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
        self.dirty.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Default)]
    struct MockBackend {
        stored: RwLock<HashMap<String, SettingValue>>,
        stores: RwLock<usize>,
        fail_store: AtomicBool,
    }

    #[async_trait]
    impl SettingsBackend for MockBackend {
        async fn load(&self) -> Result<HashMap<String, SettingValue>> {
            Ok(self.stored.read().clone())
        }

        async fn store(&self, values: &HashMap<String, SettingValue>) -> Result<()> {
            if self.fail_store.load(Ordering::SeqCst) {
                anyhow::bail!("disk full");
            }
            *self.stored.write() = values.clone();
            *self.stores.write() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_open_loads_backend_values() {
        let backend = Arc::new(MockBackend::default());
        backend
            .stored
            .write()
            .insert("a".to_string(), SettingValue::Bool(true));

        let cache = CachedDataSource::open(backend).await.unwrap();
        assert_eq!(cache.bool("a"), Some(true));
        assert!(!cache.is_dirty());
    }

    #[tokio::test]
    async fn test_flush_only_when_dirty() {
        let backend = Arc::new(MockBackend::default());
        let cache = CachedDataSource::new(backend.clone());

        assert!(!cache.flush().await.unwrap());
        assert_eq!(*backend.stores.read(), 0);

        cache.set("a", Some(SettingValue::from("x")));
        assert!(cache.is_dirty());
        assert!(cache.flush().await.unwrap());
        assert!(!cache.is_dirty());
        assert_eq!(
            backend.stored.read().get("a"),
            Some(&SettingValue::from("x"))
        );

        assert!(!cache.flush().await.unwrap());
        assert_eq!(*backend.stores.read(), 1);
    }

    #[tokio::test]
    async fn test_failed_flush_stays_dirty() {
        let backend = Arc::new(MockBackend::default());
        backend.fail_store.store(true, Ordering::SeqCst);
        let cache = CachedDataSource::new(backend.clone());

        cache.set("a", Some(SettingValue::Int(1)));
        assert!(cache.flush().await.is_err());
        assert!(cache.is_dirty());

        backend.fail_store.store(false, Ordering::SeqCst);
        assert!(cache.flush().await.unwrap());
    }

    #[tokio::test]
    async fn test_load_discards_unflushed_writes() {
        let backend = Arc::new(MockBackend::default());
        let cache = CachedDataSource::new(backend);

        cache.set("a", Some(SettingValue::Int(1)));
        cache.load().await.unwrap();
        assert!(!cache.has_value("a"));
        assert!(!cache.is_dirty());
    }
}
