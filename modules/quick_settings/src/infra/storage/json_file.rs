//! JSON file backend
//!
//! Stores every value in one flat JSON object, `key -> bool | number | string`.

use crate::contract::SettingValue;
use crate::domain::repository::SettingsBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Backend persisting settings to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsBackend for JsonFileBackend {
    async fn load(&self) -> Result<HashMap<String, SettingValue>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "settings file missing, starting empty");
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }

        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    async fn store(&self, values: &HashMap<String, SettingValue>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        // JSON has no encoding for NaN or infinity
        if let Some((key, _)) = values
            .iter()
            .find(|(_, value)| matches!(value, SettingValue::Float(n) if !n.is_finite()))
        {
            anyhow::bail!(
                "refusing to write non-finite value for '{}' to {}",
                key,
                self.path.display()
            );
        }

        // sorted keys keep the file stable across flushes
        let sorted: BTreeMap<&String, &SettingValue> = values.iter().collect();
        let json = serde_json::to_vec_pretty(&sorted)?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .with_context(|| format!("failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("settings.json"));
        assert!(backend.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested").join("settings.json"));

        let mut values = HashMap::new();
        values.insert("general.foo".to_string(), SettingValue::Bool(false));
        values.insert("volume".to_string(), SettingValue::Float(0.25));
        values.insert("speed".to_string(), SettingValue::from("fast"));
        backend.store(&values).await.unwrap();

        let loaded = backend.load().await.unwrap();
        assert_eq!(loaded, values);
        assert!(!backend.temp_path().exists());
    }

    #[tokio::test]
    async fn test_non_finite_value_leaves_file_readable() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("settings.json"));

        let mut values = HashMap::new();
        values.insert("volume".to_string(), SettingValue::Float(2.5));
        backend.store(&values).await.unwrap();

        values.insert("volume".to_string(), SettingValue::Float(f32::NAN));
        let err = backend.store(&values).await.unwrap_err();
        assert!(err.to_string().contains("non-finite value for 'volume'"));

        let loaded = backend.load().await.unwrap();
        assert_eq!(loaded.get("volume"), Some(&SettingValue::Float(2.5)));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileBackend::new(&path).load().await.unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
