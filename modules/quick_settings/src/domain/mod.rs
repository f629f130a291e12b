//! Domain layer - traversal, validation and the binding service

pub mod events;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod tree;
pub mod validation;

pub use events::{BroadcastEventPublisher, EventPublisher, NoOpEventPublisher, SettingEvent};
pub use repository::{SettingsBackend, SettingsDataSource};
pub use service::Service;
pub use tree::SettingsTree;
