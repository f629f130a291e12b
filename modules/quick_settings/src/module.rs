//! Module wiring - assembles tree, store, publisher and service

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::{Setting, SettingsApi, SettingsError};
use crate::domain::{
    BroadcastEventPublisher, SettingEvent, SettingsDataSource, Service, SettingsTree,
};
use crate::infra::storage::{CachedDataSource, InMemoryDataSource, JsonFileBackend};
use std::sync::Arc;
use tokio::sync::broadcast;

/// A settings tree bound to its store, ready for a presentation layer
pub struct SettingsModule {
    config: Config,
    service: Arc<Service>,
    events: Arc<BroadcastEventPublisher>,
    cache: Option<Arc<CachedDataSource>>,
}

impl SettingsModule {
    /// Open the module with the store named by `config`
    ///
    /// With `store_path` set, values are loaded from that JSON file into a
    /// cache; otherwise they live in memory only.
    pub async fn open(config: Config, root: Setting) -> Result<Self, SettingsError> {
        match config.store_path.clone() {
            Some(path) => {
                let backend = Arc::new(JsonFileBackend::new(path));
                let cache = Arc::new(
                    CachedDataSource::open(backend)
                        .await
                        .map_err(storage_error)?,
                );
                let data_source: Arc<dyn SettingsDataSource> = cache.clone();
                Self::assemble(config, root, data_source, Some(cache))
            }
            None => Self::with_data_source(config, root, Arc::new(InMemoryDataSource::new())),
        }
    }

    /// Bind to a caller-provided store; `store_path` is ignored
    pub fn with_data_source(
        config: Config,
        root: Setting,
        data_source: Arc<dyn SettingsDataSource>,
    ) -> Result<Self, SettingsError> {
        Self::assemble(config, root, data_source, None)
    }

    fn assemble(
        config: Config,
        root: Setting,
        data_source: Arc<dyn SettingsDataSource>,
        cache: Option<Arc<CachedDataSource>>,
    ) -> Result<Self, SettingsError> {
        let tree = if config.reject_duplicate_keys {
            SettingsTree::new(root)?
        } else {
            SettingsTree::new_unchecked(root)
        };

        let events = Arc::new(BroadcastEventPublisher::with_capacity(config.event_capacity));
        let service = Arc::new(
            Service::new(Arc::new(tree), data_source, events.clone())
                .with_write_validation(config.validate_writes),
        );

        if config.initialize_on_start {
            service.initialize();
        }

        tracing::info!(
            keys = service.keys().len(),
            persistent = cache.is_some(),
            "settings module ready"
        );

        Ok(Self {
            config,
            service,
            events,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Client for the presentation layer
    pub fn client(&self) -> Arc<dyn SettingsApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// Receive change events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SettingEvent> {
        self.events.subscribe()
    }

    /// Persist pending writes; returns whether anything was written
    pub async fn flush(&self) -> Result<bool, SettingsError> {
        match &self.cache {
            Some(cache) => cache.flush().await.map_err(storage_error),
            None => Ok(false),
        }
    }

    /// Reload values from the backing file, dropping unflushed writes
    pub async fn reload(&self) -> Result<(), SettingsError> {
        if let Some(cache) = &self.cache {
            cache.load().await.map_err(storage_error)?;
        }
        Ok(())
    }
}

fn storage_error(error: anyhow::Error) -> SettingsError {
    tracing::error!("settings storage error: {:?}", error);
    SettingsError::Storage(format!("{:#}", error))
}
