//! Traversal and value resolution over a settings tree
//!
//! All functions here are bounded, synchronous walks. They never fail: a key
//! that is absent from the tree or the store resolves to `None` or a default.

use super::repository::SettingsDataSource;
use crate::contract::{Select, Setting, SettingValue, Slider, Text, Toggle};

/// Visit `setting` and all of its descendants in pre-order
pub fn walk<'a, F>(setting: &'a Setting, visit: &mut F)
where
    F: FnMut(&'a Setting),
{
    visit(setting);
    if let Setting::Group(group) = setting {
        for child in group.children() {
            walk(child, visit);
        }
    }
}

/// Keys of every keyed node, in pre-order
pub fn keys(setting: &Setting) -> Vec<&str> {
    let mut keys = Vec::new();
    walk(setting, &mut |node| {
        if let Some(key) = node.unique_id() {
            keys.push(key);
        }
    });
    keys
}

/// Depth-first search for the keyed node with `target` as its key
///
/// Children are searched in order and the first match wins, so with
/// duplicate keys the node met first in pre-order is returned.
pub fn find_by_key<'a>(setting: &'a Setting, target: &str) -> Option<&'a Setting> {
    match setting {
        Setting::Group(group) => group
            .children()
            .iter()
            .find_map(|child| find_by_key(child, target)),
        Setting::Info(_) | Setting::Action(_) => None,
        Setting::Toggle(_) | Setting::Slider(_) | Setting::Text(_) | Setting::Select(_) => {
            (setting.unique_id() == Some(target)).then_some(setting)
        }
    }
}

/// Key and default of a node whose value is persisted
///
/// `None` for unkeyed nodes and secure text. The default itself may be
/// absent for text nodes.
fn persisted_default(setting: &Setting) -> Option<(&str, Option<SettingValue>)> {
    match setting {
        Setting::Toggle(toggle) => Some((toggle.key(), Some(toggle.default_value().into()))),
        Setting::Slider(slider) => Some((slider.key(), Some(slider.default_value().into()))),
        Setting::Text(text) if text.is_secure() => None,
        Setting::Text(text) => Some((text.key(), text.default_value().map(SettingValue::from))),
        Setting::Select(select) => Some((
            select.key(),
            Some(select.options().default_value().into()),
        )),
        Setting::Info(_) | Setting::Action(_) | Setting::Group(_) => None,
    }
}

/// Overwrite every persisted key under `setting` with its default
///
/// Destructive: existing values are replaced without being read. Returns the
/// keys written, in pre-order.
pub fn reset(setting: &Setting, data_source: &dyn SettingsDataSource) -> Vec<String> {
    let mut written = Vec::new();
    walk(setting, &mut |node| {
        if let Some((key, default_value)) = persisted_default(node) {
            tracing::debug!(key, default = ?default_value, "resetting setting");
            data_source.set(key, default_value);
            written.push(key.to_string());
        }
    });
    written
}

/// Write defaults for persisted keys that have no stored value
///
/// Existing values are left alone, so a second call writes nothing. Text
/// nodes without a default have nothing to write. Returns the keys written.
pub fn initialize(setting: &Setting, data_source: &dyn SettingsDataSource) -> Vec<String> {
    let mut written = Vec::new();
    walk(setting, &mut |node| {
        let Some((key, Some(default_value))) = persisted_default(node) else {
            return;
        };
        if !data_source.has_value(key) {
            tracing::debug!(key, default = ?default_value, "initializing setting");
            data_source.set(key, Some(default_value));
            written.push(key.to_string());
        }
    });
    written
}

/// Value `setting` resolves to against `data_source`
///
/// `None` for unkeyed nodes and for text with neither a stored value nor a
/// default.
pub fn effective_value(
    setting: &Setting,
    data_source: &dyn SettingsDataSource,
) -> Option<SettingValue> {
    match setting {
        Setting::Toggle(toggle) => Some(toggle.value(data_source).into()),
        Setting::Slider(slider) => Some(slider.value(data_source).into()),
        Setting::Text(text) => text.value(data_source).map(SettingValue::from),
        Setting::Select(select) => Some(select.value(data_source).into()),
        Setting::Info(_) | Setting::Action(_) | Setting::Group(_) => None,
    }
}

impl Toggle {
    /// Stored flag, or the default when nothing usable is stored
    pub fn value(&self, data_source: &dyn SettingsDataSource) -> bool {
        data_source.bool(self.key()).unwrap_or(self.default_value())
    }
}

impl Slider {
    /// Stored number, or the default when nothing usable is stored
    pub fn value(&self, data_source: &dyn SettingsDataSource) -> f32 {
        data_source.float(self.key()).unwrap_or(self.default_value())
    }
}

impl Text {
    /// Stored string, or the default. Secure text only ever yields its default.
    pub fn value(&self, data_source: &dyn SettingsDataSource) -> Option<String> {
        if self.is_secure() {
            return self.default_value().map(str::to_string);
        }
        data_source
            .string(self.key())
            .or_else(|| self.default_value().map(str::to_string))
    }
}

impl Select {
    /// Stored option if it is still offered, otherwise the options' default
    ///
    /// A stale stored option is left in the store untouched.
    pub fn value(&self, data_source: &dyn SettingsDataSource) -> String {
        let options = self.options();
        match data_source.string(self.key()) {
            Some(stored) if options.contains(&stored) => stored,
            Some(stored) => {
                tracing::debug!(
                    key = self.key(),
                    stored = %stored,
                    fallback = options.default_value(),
                    "stored option is no longer offered"
                );
                options.default_value().to_string()
            }
            None => options.default_value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{StaticOptions, TextType};
    use crate::infra::storage::InMemoryDataSource;
    use std::sync::Arc;

    fn sample_tree() -> Setting {
        Setting::group(
            "G",
            vec![
                Setting::toggle("Foo", "k1", true),
                Setting::select("Bar", "k2", Arc::new(StaticOptions::new(["A", "B"], "A")))
                    .unwrap(),
            ],
        )
    }

    #[test]
    fn test_find_by_key_top_level_and_missing() {
        let tree = sample_tree();
        let found = find_by_key(&tree, "k2").unwrap();
        assert_eq!(found.unique_id(), Some("k2"));
        assert!(find_by_key(&tree, "nope").is_none());
    }

    #[test]
    fn test_find_by_key_ignores_unkeyed_nodes() {
        let tree = Setting::group(
            "G",
            vec![
                Setting::info("Version", "1.0"),
                Setting::action("Go", Default::default(), || {}),
            ],
        );
        assert!(find_by_key(&tree, "Version").is_none());
        assert!(find_by_key(&tree, "Go").is_none());
    }

    #[test]
    fn test_find_by_key_returns_leaf_not_enclosing_group() {
        let tree = Setting::group(
            "Outer",
            vec![Setting::group(
                "Inner",
                vec![Setting::toggle("Deep", "deep.k", false)],
            )],
        );
        let found = find_by_key(&tree, "deep.k").unwrap();
        assert!(matches!(found, Setting::Toggle(_)));
    }

    #[test]
    fn test_keys_in_pre_order() {
        let tree = Setting::group(
            "G",
            vec![
                Setting::toggle("A", "a", true),
                Setting::group("Sub", vec![Setting::text("B", "b", None)]),
                Setting::info("I", "i"),
                Setting::toggle("C", "c", false),
            ],
        );
        assert_eq!(keys(&tree), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_initialize_writes_missing_defaults() {
        let store = InMemoryDataSource::new();
        let written = initialize(&sample_tree(), &store);
        assert_eq!(written, vec!["k1", "k2"]);
        assert_eq!(store.get("k1"), Some(SettingValue::Bool(true)));
        assert_eq!(store.get("k2"), Some(SettingValue::String("A".to_string())));
    }

    #[test]
    fn test_initialize_keeps_existing_values() {
        let store = InMemoryDataSource::new();
        store.set("k1", Some(SettingValue::Bool(false)));
        let written = initialize(&sample_tree(), &store);
        assert_eq!(written, vec!["k2"]);
        assert_eq!(store.get("k1"), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_reset_overwrites_existing_values() {
        let store = InMemoryDataSource::new();
        store.set("k1", Some(SettingValue::Bool(false)));
        store.set("k2", Some(SettingValue::from("B")));
        reset(&sample_tree(), &store);
        assert_eq!(store.get("k1"), Some(SettingValue::Bool(true)));
        assert_eq!(store.get("k2"), Some(SettingValue::from("A")));
    }

    #[test]
    fn test_reset_text_without_default_clears_value() {
        let store = InMemoryDataSource::new();
        store.set("phone", Some(SettingValue::from("555")));
        let tree: Setting = Text::new("Phone", "phone").with_type(TextType::Phone).into();
        reset(&tree, &store);
        assert!(!store.has_value("phone"));
    }

    #[test]
    fn test_initialize_skips_text_without_default() {
        let store = InMemoryDataSource::new();
        let tree: Setting = Text::new("Url", "url").with_type(TextType::Url).into();
        assert!(initialize(&tree, &store).is_empty());
        assert!(!store.has_value("url"));
    }

    #[test]
    fn test_effective_value_wrong_stored_kind_falls_back() {
        let store = InMemoryDataSource::new();
        store.set("k1", Some(SettingValue::from("yes")));
        let tree = sample_tree();
        let toggle = find_by_key(&tree, "k1").unwrap();
        assert_eq!(effective_value(toggle, &store), Some(SettingValue::Bool(true)));
    }

    #[test]
    fn test_slider_reads_stored_integer() {
        let store = InMemoryDataSource::new();
        store.set("volume", Some(SettingValue::Int(3)));
        let slider = Setting::slider("Volume", "volume", 0.0, 10.0, 5.0).unwrap();
        assert_eq!(effective_value(&slider, &store), Some(SettingValue::Float(3.0)));
    }

    #[test]
    fn test_effective_value_of_unkeyed_nodes() {
        let store = InMemoryDataSource::new();
        assert_eq!(effective_value(&Setting::info("I", "i"), &store), None);
        assert_eq!(effective_value(&sample_tree(), &store), None);
    }
}
