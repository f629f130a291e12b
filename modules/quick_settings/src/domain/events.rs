//! Domain events for quick settings
//!
//! Events are published by the binding service after it writes to the data
//! source:
//! - `SettingChanged`: one key was set through the service
//! - `SettingsReset`: keys were overwritten with their defaults
//! - `SettingsInitialized`: missing keys were seeded with defaults
//!
//! Pure traversals never publish. Publishing failures are logged by the
//! service and never fail the write.

use crate::contract::SettingValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default broadcast channel capacity.
const DEFAULT_CAPACITY: usize = 256;

/// Domain event types for settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SettingEvent {
    /// A value was stored for one key
    SettingChanged(SettingChangedEvent),
    /// Keys were overwritten with defaults
    SettingsReset(SettingsWrittenEvent),
    /// Missing keys were filled with defaults
    SettingsInitialized(SettingsWrittenEvent),
}

/// Event data for a single stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChangedEvent {
    /// Setting key
    pub key: String,
    /// Stored value; `None` when the value was cleared
    pub value: Option<SettingValue>,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

/// Event data for bulk default writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsWrittenEvent {
    /// Keys written, in tree order
    pub keys: Vec<String>,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

impl SettingEvent {
    /// Create a new SettingChanged event
    pub fn changed(key: impl Into<String>, value: Option<SettingValue>) -> Self {
        SettingEvent::SettingChanged(SettingChangedEvent {
            key: key.into(),
            value,
            timestamp: Utc::now(),
        })
    }

    /// Create a new SettingsReset event
    pub fn reset(keys: Vec<String>) -> Self {
        SettingEvent::SettingsReset(SettingsWrittenEvent {
            keys,
            timestamp: Utc::now(),
        })
    }

    /// Create a new SettingsInitialized event
    pub fn initialized(keys: Vec<String>) -> Self {
        SettingEvent::SettingsInitialized(SettingsWrittenEvent {
            keys,
            timestamp: Utc::now(),
        })
    }

    /// Whether the event touched `key`
    pub fn affects(&self, key: &str) -> bool {
        match self {
            SettingEvent::SettingChanged(e) => e.key == key,
            SettingEvent::SettingsReset(e) | SettingEvent::SettingsInitialized(e) => {
                e.keys.iter().any(|k| k == key)
            }
        }
    }
}

/// Event publisher trait for settings events
pub trait EventPublisher: Send + Sync {
    /// Publish an event to whoever observes settings changes
    fn publish(&self, event: SettingEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

impl EventPublisher for NoOpEventPublisher {
    fn publish(&self, _event: SettingEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Broadcast-based publisher
///
/// Non-blocking: slow receivers lag and lose events rather than blocking
/// the writer. Publishing with no subscribers is not an error.
pub struct BroadcastEventPublisher {
    tx: broadcast::Sender<SettingEvent>,
}

impl BroadcastEventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SettingEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for BroadcastEventPublisher {
    fn publish(&self, event: SettingEvent) -> anyhow::Result<()> {
        // send only fails when nobody is subscribed
        let _ = self.tx.send(event);
        Ok(())
    }
}
