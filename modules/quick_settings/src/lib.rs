//! Quick Settings
//!
//! Declarative settings schema bound to a key-value store. A schema is a
//! tree of toggles, sliders, text fields, selects, info rows, actions and
//! nested groups. The crate resolves each keyed setting to its effective
//! value, seeds and resets defaults, and publishes changes. Rendering is
//! left to the caller.

// Public exports
pub mod contract;
pub use contract::{
    client::SettingsApi, error::SettingsError, Action, ActionStyle, EnumOptions, Group, Info,
    OptionDescription, Select, Setting, SettingKind, SettingValue, SettingsOptions, Slider,
    StaticOptions, Text, TextType, Toggle,
};

pub mod domain;
pub use domain::{
    BroadcastEventPublisher, EventPublisher, NoOpEventPublisher, Service, SettingEvent,
    SettingsBackend, SettingsDataSource, SettingsTree,
};

pub mod module;
pub use module::SettingsModule;

pub mod config;
pub use config::Config;

pub mod api;
pub mod infra;
pub use infra::storage::{CachedDataSource, InMemoryDataSource, JsonFileBackend};
