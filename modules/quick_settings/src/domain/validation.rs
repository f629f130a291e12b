//! Schema and write validation

use super::resolver::keys;
use crate::contract::{Setting, SettingValue, SettingsError};
use std::collections::HashSet;

/// Reject trees where two keyed nodes share a key
pub fn ensure_unique_keys(root: &Setting) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    for key in keys(root) {
        if !seen.insert(key) {
            return Err(SettingsError::DuplicateKey {
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Check that `value` may be stored for `setting`
///
/// Returns the value normalized for storage (integers become floats for
/// sliders). `None` is only accepted by text settings, where it clears the
/// stored value.
pub fn validate_write(
    setting: &Setting,
    value: Option<SettingValue>,
) -> Result<Option<SettingValue>, SettingsError> {
    let key = setting.unique_id().unwrap_or_default().to_string();
    let actual = value.as_ref().map_or("absent", SettingValue::type_name);

    match setting {
        Setting::Toggle(_) => match value {
            Some(SettingValue::Bool(flag)) => Ok(Some(SettingValue::Bool(flag))),
            _ => Err(SettingsError::TypeMismatch {
                key,
                expected: "bool",
                actual,
            }),
        },
        Setting::Slider(slider) => {
            let number = value
                .as_ref()
                .and_then(SettingValue::as_float)
                .ok_or_else(|| SettingsError::TypeMismatch {
                    key: key.clone(),
                    expected: "float",
                    actual,
                })?;
            if !slider.contains(number) {
                return Err(SettingsError::OutOfRange {
                    key,
                    value: number,
                    min: slider.min(),
                    max: slider.max(),
                });
            }
            Ok(Some(SettingValue::Float(number)))
        }
        Setting::Text(text) if text.is_secure() => Err(SettingsError::NotPersisted { key }),
        Setting::Text(_) => match value {
            Some(SettingValue::String(text)) => Ok(Some(SettingValue::String(text))),
            None => Ok(None),
            Some(_) => Err(SettingsError::TypeMismatch {
                key,
                expected: "string",
                actual,
            }),
        },
        Setting::Select(select) => match value {
            Some(SettingValue::String(option)) if select.options().contains(&option) => {
                Ok(Some(SettingValue::String(option)))
            }
            Some(SettingValue::String(option)) => Err(SettingsError::InvalidOption {
                key,
                value: option,
            }),
            _ => Err(SettingsError::TypeMismatch {
                key,
                expected: "string",
                actual,
            }),
        },
        Setting::Info(_) | Setting::Action(_) | Setting::Group(_) => {
            Err(SettingsError::NotPersisted { key })
        }
    }
}
