//! Domain service - binds one settings tree to one data source

use super::events::{EventPublisher, SettingEvent};
use super::repository::SettingsDataSource;
use super::tree::SettingsTree;
use super::{resolver, validation};
use crate::contract::{Setting, SettingValue, SettingsError};
use std::sync::Arc;

/// Domain service for a bound settings tree
///
/// Reads resolve through the tree's defaulting rules; writes go straight to
/// the data source and are then published. The service holds no values of
/// its own.
pub struct Service {
    tree: Arc<SettingsTree>,
    data_source: Arc<dyn SettingsDataSource>,
    event_publisher: Arc<dyn EventPublisher>,
    validate_writes: bool,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        tree: Arc<SettingsTree>,
        data_source: Arc<dyn SettingsDataSource>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            tree,
            data_source,
            event_publisher,
            validate_writes: true,
        }
    }

    /// Enable or disable type, range and option checks on writes
    pub fn with_write_validation(mut self, enabled: bool) -> Self {
        self.validate_writes = enabled;
        self
    }

    pub fn tree(&self) -> &SettingsTree {
        &self.tree
    }

    pub fn data_source(&self) -> &Arc<dyn SettingsDataSource> {
        &self.data_source
    }

    // ===== Reads =====

    /// Keyed node for `key`
    pub fn setting(&self, key: &str) -> Option<&Setting> {
        self.tree.find(key)
    }

    /// Every key in the tree, in tree order
    pub fn keys(&self) -> Vec<String> {
        self.tree.keys().into_iter().map(str::to_string).collect()
    }

    /// Value the node for `key` resolves to
    pub fn effective_value(&self, key: &str) -> Option<SettingValue> {
        self.tree.effective_value(key, self.data_source.as_ref())
    }

    // ===== Writes =====

    /// Store `value` for `key`
    ///
    /// Secure text and non-finite floats are always refused. With write
    /// validation on, the value must also fit the node's kind, range and
    /// options.
    pub fn set_value(&self, key: &str, value: Option<SettingValue>) -> Result<(), SettingsError> {
        let setting = self.find_required(key)?;

        if let Setting::Text(text) = setting {
            if text.is_secure() {
                return Err(SettingsError::NotPersisted {
                    key: key.to_string(),
                });
            }
        }

        if let Some(SettingValue::Float(number)) = &value {
            if !number.is_finite() {
                return Err(SettingsError::TypeMismatch {
                    key: key.to_string(),
                    expected: "finite number",
                    actual: "non-finite float",
                });
            }
        }

        let value = if self.validate_writes {
            validation::validate_write(setting, value)?
        } else {
            value
        };

        tracing::debug!(key, value = ?value, "storing setting");
        self.data_source.set(key, value.clone());
        self.publish(SettingEvent::changed(key, value));
        Ok(())
    }

    /// Overwrite every key with its default
    pub fn reset(&self) -> Vec<String> {
        let written = self.tree.reset(self.data_source.as_ref());
        tracing::info!(count = written.len(), "settings reset to defaults");
        if !written.is_empty() {
            self.publish(SettingEvent::reset(written.clone()));
        }
        written
    }

    /// Overwrite one key with its default
    pub fn reset_key(&self, key: &str) -> Result<(), SettingsError> {
        let setting = self.find_required(key)?;
        let written = resolver::reset(setting, self.data_source.as_ref());
        if !written.is_empty() {
            self.publish(SettingEvent::reset(written));
        }
        Ok(())
    }

    /// Write defaults for keys with no stored value
    pub fn initialize(&self) -> Vec<String> {
        let written = self.tree.initialize(self.data_source.as_ref());
        if !written.is_empty() {
            tracing::info!(count = written.len(), "seeded missing settings with defaults");
            self.publish(SettingEvent::initialized(written.clone()));
        }
        written
    }

    // ===== Helper Methods =====

    fn find_required(&self, key: &str) -> Result<&Setting, SettingsError> {
        self.tree.find(key).ok_or_else(|| SettingsError::NotFound {
            key: key.to_string(),
        })
    }

    fn publish(&self, event: SettingEvent) {
        // Log error but don't fail the operation
        if let Err(e) = self.event_publisher.publish(event) {
            tracing::warn!(error = %e, "failed to publish settings event");
        }
    }
}
