//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{Setting, SettingValue, SettingsApi, SettingsError};
use crate::domain::Service;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl SettingsApi for NativeClient {
    fn setting(&self, key: &str) -> Option<Setting> {
        self.service.setting(key).cloned()
    }

    fn effective_value(&self, key: &str) -> Option<SettingValue> {
        self.service.effective_value(key)
    }

    fn set_value(&self, key: &str, value: Option<SettingValue>) -> Result<(), SettingsError> {
        self.service.set_value(key, value)
    }

    fn reset_settings(&self) -> Vec<String> {
        self.service.reset()
    }

    fn initialize_settings(&self) -> Vec<String> {
        self.service.initialize()
    }
}
