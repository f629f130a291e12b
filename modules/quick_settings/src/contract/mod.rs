//! Contract layer - public model and client API
//!
//! This layer holds the schema types and the client trait consumed by a
//! presentation layer. It references no presentation or storage types.

pub mod client;
pub mod error;
pub mod model;

pub use client::SettingsApi;
pub use error::SettingsError;
pub use model::{
    Action, ActionCallback, ActionStyle, EnumOptions, Group, Info, OptionDescription, Select,
    Setting, SettingKind, SettingValue, SettingsOptions, Slider, StaticOptions, Text, TextType,
    Toggle,
};
