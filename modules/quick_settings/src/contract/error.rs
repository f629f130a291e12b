//! Contract error types for quick settings
//!
//! Configuration errors are raised while a schema is built. Write errors are
//! raised by the binding service. Missing or stale stored values are never
//! errors; they resolve to defaults.

use thiserror::Error;

/// Quick settings errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// Two keyed nodes in one tree share a key
    #[error("duplicate setting key: {key}")]
    DuplicateKey { key: String },

    /// Slider bounds inverted or default outside them
    #[error("slider '{key}' default {default_value} is outside [{min}, {max}]")]
    SliderRange {
        key: String,
        min: f32,
        max: f32,
        default_value: f32,
    },

    /// Select built over an option set with no options
    #[error("select '{key}' has no options")]
    EmptyOptions { key: String },

    /// Select default not offered by its own option set
    #[error("select '{key}' default '{default_value}' is not one of its options")]
    DefaultNotInOptions { key: String, default_value: String },

    /// No keyed node with this key in the tree
    #[error("setting not found: {key}")]
    NotFound { key: String },

    /// Written value has the wrong kind for the node
    #[error("setting '{key}' expects {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Slider value outside the slider's range
    #[error("setting '{key}' value {value} is outside [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Select value not among the current options
    #[error("setting '{key}' does not offer option '{value}'")]
    InvalidOption { key: String, value: String },

    /// Secure text is never stored
    #[error("setting '{key}' is not persisted")]
    NotPersisted { key: String },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Backing store failed to load or flush
    #[error("storage error: {0}")]
    Storage(String),
}

impl SettingsError {
    /// Whether the error indicates a broken schema definition
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. }
                | Self::SliderRange { .. }
                | Self::EmptyOptions { .. }
                | Self::DefaultNotInOptions { .. }
        )
    }
}
