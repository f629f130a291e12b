//! Contract models for quick settings
//!
//! A settings schema is a tree of [`Setting`] nodes. The node kinds form a
//! closed set: every traversal matches on [`Setting`] exhaustively, so adding
//! a kind is a compile error until each traversal handles it.
//!
//! Nodes are built once and never mutated. Only the values behind their keys
//! change, and those live in a data source, not in the tree.

use super::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use strum::IntoEnumIterator;

// ===== Stored values =====

/// Largest integer magnitude an `f32` represents without rounding
const MAX_EXACT_F32_INT: u64 = 1 << 24;

/// A primitive value stored under a setting key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    String(String),
}

impl SettingValue {
    /// Short name of the value kind, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers are accepted as floats when `f32` holds them exactly
    /// (magnitude up to 2^24); nothing else converts.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) if value.unsigned_abs() <= MAX_EXACT_F32_INT => Some(*value as f32),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for SettingValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "{}", value),
        }
    }
}

// ===== Option sets =====

/// An ordered list of option labels with a default, used by [`Select`] nodes
///
/// The default should be one of the options. [`Setting::select`] rejects
/// option sets where it is not, but resolution still falls back to it if an
/// implementation changes underneath a tree.
pub trait SettingsOptions: fmt::Debug + Send + Sync {
    /// Option labels in display order
    fn options(&self) -> &[String];

    /// Option used when nothing valid has been selected
    fn default_value(&self) -> &str;

    /// Optional longer description for an option
    fn description(&self, _option: &str) -> Option<&str> {
        None
    }

    /// Whether `option` is currently offered
    fn contains(&self, option: &str) -> bool {
        self.options().iter().any(|o| o == option)
    }
}

/// Option set given as an explicit list of labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticOptions {
    options: Vec<String>,
    default_value: String,
    descriptions: HashMap<String, String>,
}

impl StaticOptions {
    pub fn new<I, S>(options: I, default_value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            default_value: default_value.into(),
            descriptions: HashMap::new(),
        }
    }

    /// Attach descriptions to some of the options
    pub fn with_descriptions<I, K, V>(mut self, descriptions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.descriptions.extend(
            descriptions
                .into_iter()
                .map(|(option, text)| (option.into(), text.into())),
        );
        self
    }
}

impl SettingsOptions for StaticOptions {
    fn options(&self) -> &[String] {
        &self.options
    }

    fn default_value(&self) -> &str {
        &self.default_value
    }

    fn description(&self, option: &str) -> Option<&str> {
        self.descriptions.get(option).map(String::as_str)
    }
}

/// Per-case description for enums used with [`EnumOptions::described`]
pub trait OptionDescription {
    fn description(&self) -> Option<&'static str>;
}

/// Option set derived from an enum's cases, in declaration order
///
/// Each case's label is its `AsRef<str>` string, so
/// `#[derive(strum::EnumIter, strum::AsRefStr)]` is all an enum needs.
#[derive(Debug, Clone)]
pub struct EnumOptions<T> {
    selected: T,
    options: Vec<String>,
    descriptions: Vec<Option<&'static str>>,
}

impl<T> EnumOptions<T>
where
    T: IntoEnumIterator + AsRef<str>,
{
    /// Build the option list from every case of `T`, with `default` preselected
    pub fn new(default: T) -> Self {
        let options: Vec<String> = T::iter().map(|case| case.as_ref().to_string()).collect();
        let descriptions = vec![None; options.len()];
        Self {
            selected: default,
            options,
            descriptions,
        }
    }

    /// The default case
    pub fn selected(&self) -> &T {
        &self.selected
    }

    /// Map a stored label back to its case
    pub fn parse(&self, label: &str) -> Option<T> {
        T::iter().find(|case| case.as_ref() == label)
    }
}

impl<T> EnumOptions<T>
where
    T: IntoEnumIterator + AsRef<str> + OptionDescription,
{
    /// Like [`EnumOptions::new`], also collecting each case's description
    pub fn described(default: T) -> Self {
        let (options, descriptions): (Vec<String>, Vec<Option<&'static str>>) = T::iter()
            .map(|case| (case.as_ref().to_string(), case.description()))
            .unzip();
        Self {
            selected: default,
            options,
            descriptions,
        }
    }
}

impl<T> SettingsOptions for EnumOptions<T>
where
    T: AsRef<str> + fmt::Debug + Send + Sync,
{
    fn options(&self) -> &[String] {
        &self.options
    }

    fn default_value(&self) -> &str {
        self.selected.as_ref()
    }

    fn description(&self, option: &str) -> Option<&str> {
        let index = self.options.iter().position(|o| o == option)?;
        self.descriptions.get(index).copied().flatten()
    }
}

// ===== Setting nodes =====

/// Boolean switch
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    label: String,
    key: String,
    default_value: bool,
}

impl Toggle {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> bool {
        self.default_value
    }
}

/// Float value constrained to `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    label: String,
    key: String,
    min: f32,
    max: f32,
    default_value: f32,
}

impl Slider {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Input hint for text settings. Hints only; values are never validated against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    #[default]
    Text,
    Name,
    Url,
    Int,
    Phone,
    Password,
    Email,
    Decimal,
}

impl TextType {
    /// Secure fields are never read from or written to storage
    pub fn is_secure(self) -> bool {
        matches!(self, Self::Password)
    }

    pub fn autocorrect(self) -> bool {
        matches!(self, Self::Text)
    }

    pub fn capitalize_words(self) -> bool {
        matches!(self, Self::Name)
    }
}

/// Free-form string setting
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    label: String,
    key: String,
    default_value: Option<String>,
    placeholder: Option<String>,
    text_type: TextType,
}

impl Text {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            default_value: None,
            placeholder: None,
            text_type: TextType::default(),
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_type(mut self, text_type: TextType) -> Self {
        self.text_type = text_type;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn text_type(&self) -> TextType {
        self.text_type
    }

    pub fn is_secure(&self) -> bool {
        self.text_type.is_secure()
    }
}

/// One-of-many choice backed by a shared option set
#[derive(Debug, Clone)]
pub struct Select {
    label: String,
    key: String,
    options: Arc<dyn SettingsOptions>,
}

impl Select {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn options(&self) -> &Arc<dyn SettingsOptions> {
        &self.options
    }
}

/// Read-only informational row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    label: String,
    text: String,
}

impl Info {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Presentation style of an [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStyle {
    #[default]
    Normal,
    Default,
    Destructive,
}

pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// Button-like trigger. Carries no key and stores nothing.
#[derive(Clone)]
pub struct Action {
    title: String,
    style: ActionStyle,
    callback: ActionCallback,
}

impl Action {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> ActionStyle {
        self.style
    }

    pub fn invoke(&self) {
        (self.callback)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("title", &self.title)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Ordered container of child settings
#[derive(Debug, Clone)]
pub struct Group {
    title: Option<String>,
    children: Vec<Setting>,
    footer: Option<String>,
}

impl Group {
    pub fn new(children: Vec<Setting>) -> Self {
        Self {
            title: None,
            children,
            footer: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn children(&self) -> &[Setting] {
        &self.children
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }
}

/// Discriminant of a [`Setting`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Toggle,
    Slider,
    Text,
    Select,
    Info,
    Action,
    Group,
}

/// A node of the settings schema
#[derive(Debug, Clone)]
pub enum Setting {
    Toggle(Toggle),
    Slider(Slider),
    Text(Text),
    Select(Select),
    Info(Info),
    Action(Action),
    Group(Group),
}

impl Setting {
    pub fn toggle(label: impl Into<String>, key: impl Into<String>, default_value: bool) -> Self {
        Self::Toggle(Toggle {
            label: label.into(),
            key: key.into(),
            default_value,
        })
    }

    /// Slider over `[min, max]`. Rejects a default outside the range and NaN bounds.
    pub fn slider(
        label: impl Into<String>,
        key: impl Into<String>,
        min: f32,
        max: f32,
        default_value: f32,
    ) -> Result<Self, SettingsError> {
        let key = key.into();
        // NaN fails every comparison, so it lands here too
        if !(min <= max && default_value >= min && default_value <= max) {
            return Err(SettingsError::SliderRange {
                key,
                min,
                max,
                default_value,
            });
        }
        Ok(Self::Slider(Slider {
            label: label.into(),
            key,
            min,
            max,
            default_value,
        }))
    }

    /// Plain text setting; use [`Text`] directly for placeholders and input types
    pub fn text(
        label: impl Into<String>,
        key: impl Into<String>,
        default_value: Option<&str>,
    ) -> Self {
        let text = Text::new(label, key);
        match default_value {
            Some(value) => text.with_default(value).into(),
            None => text.into(),
        }
    }

    /// Select over `options`. Rejects an empty option list and a default the list does not offer.
    pub fn select(
        label: impl Into<String>,
        key: impl Into<String>,
        options: Arc<dyn SettingsOptions>,
    ) -> Result<Self, SettingsError> {
        let key = key.into();
        if options.options().is_empty() {
            return Err(SettingsError::EmptyOptions { key });
        }
        if !options.contains(options.default_value()) {
            return Err(SettingsError::DefaultNotInOptions {
                key,
                default_value: options.default_value().to_string(),
            });
        }
        Ok(Self::Select(Select {
            label: label.into(),
            key,
            options,
        }))
    }

    pub fn info(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Info(Info {
            label: label.into(),
            text: text.into(),
        })
    }

    pub fn action<F>(title: impl Into<String>, style: ActionStyle, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::Action(Action {
            title: title.into(),
            style,
            callback: Arc::new(callback),
        })
    }

    pub fn group(title: impl Into<String>, children: Vec<Setting>) -> Self {
        Group::new(children).with_title(title).into()
    }

    /// Storage key of keyed nodes; `None` for Info, Action and Group
    pub fn unique_id(&self) -> Option<&str> {
        match self {
            Self::Toggle(toggle) => Some(toggle.key()),
            Self::Slider(slider) => Some(slider.key()),
            Self::Text(text) => Some(text.key()),
            Self::Select(select) => Some(select.key()),
            Self::Info(_) | Self::Action(_) | Self::Group(_) => None,
        }
    }

    pub fn kind(&self) -> SettingKind {
        match self {
            Self::Toggle(_) => SettingKind::Toggle,
            Self::Slider(_) => SettingKind::Slider,
            Self::Text(_) => SettingKind::Text,
            Self::Select(_) => SettingKind::Select,
            Self::Info(_) => SettingKind::Info,
            Self::Action(_) => SettingKind::Action,
            Self::Group(_) => SettingKind::Group,
        }
    }

    /// Display label; the title for actions and groups
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Toggle(toggle) => Some(toggle.label()),
            Self::Slider(slider) => Some(slider.label()),
            Self::Text(text) => Some(text.label()),
            Self::Select(select) => Some(select.label()),
            Self::Info(info) => Some(info.label()),
            Self::Action(action) => Some(action.title()),
            Self::Group(group) => group.title(),
        }
    }
}

impl From<Text> for Setting {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<Group> for Setting {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
