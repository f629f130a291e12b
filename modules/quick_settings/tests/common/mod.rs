//! Common test utilities and a shared sample schema

#![allow(dead_code)]

use quick_settings::{
    ActionStyle, EnumOptions, Group, OptionDescription, Setting, StaticOptions, Text, TextType,
};
use std::sync::Arc;
use strum::{AsRefStr, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, AsRefStr)]
pub enum Dogs {
    Lady,
    Tramp,
}

impl OptionDescription for Dogs {
    fn description(&self) -> Option<&'static str> {
        match self {
            Dogs::Lady => Some("Dignified and proper."),
            Dogs::Tramp => Some("Sassy and engaging."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Speed {
    Fast,
    Faster,
    Fastest,
}

/// Schema shaped like a typical app settings screen
///
/// General (toggle, info, select, text) → top-level text → actions →
/// top-level select and toggle → Extra with a nested sub group of text fields.
pub fn sample_settings() -> Setting {
    Group::new(vec![
        Group::new(vec![
            Setting::toggle("Foo", "general.foo", true),
            Setting::info("Bar Info", "this is what bar is"),
            Setting::select(
                "Bar2",
                "general.bar2",
                Arc::new(EnumOptions::described(Dogs::Lady)),
            )
            .unwrap(),
            Setting::text("Baz", "general.baz", Some("Saskatoon")),
        ])
        .with_title("General")
        .with_footer("Random settings that are not really necessary.")
        .into(),
        Setting::text("Info", "general.info", Some("Swing")),
        Setting::group(
            "Actions",
            vec![
                Setting::action("Simple Action", ActionStyle::Normal, || {}),
                Setting::action("Reset all data", ActionStyle::Destructive, || {}),
            ],
        ),
        Setting::select("How fast?", "speed", Arc::new(EnumOptions::new(Speed::Fastest)))
            .unwrap(),
        Setting::slider("Volume", "volume", 0.0, 10.0, 7.5).unwrap(),
        Setting::toggle("Should I?", "general.shouldi", true),
        Group::new(vec![
            Setting::toggle("Foo", "extra.foo", false),
            Setting::toggle("Bar", "extra.bar", true),
            Setting::text("Baz", "extra.baz", Some("TomTom")),
            Group::new(vec![
                Setting::toggle("SubFoo", "extra.subfoo", false),
                Setting::group(
                    "Text Fields",
                    vec![
                        Text::new("Password", "extra.password")
                            .with_placeholder("Enter password")
                            .with_type(TextType::Password)
                            .into(),
                        Text::new("Email", "extra.email")
                            .with_placeholder("Work email address")
                            .with_type(TextType::Email)
                            .into(),
                        Text::new("Phone", "extra.phone")
                            .with_type(TextType::Phone)
                            .into(),
                    ],
                ),
            ])
            .with_title("SubGroup")
            .with_footer("Definitions are recursive")
            .into(),
        ])
        .with_title("Extra")
        .into(),
    ])
    .into()
}

/// Group("G", [Toggle("Foo","k1",true), Select("Bar","k2",["A","B"] default "A")])
pub fn small_tree() -> Setting {
    Setting::group(
        "G",
        vec![
            Setting::toggle("Foo", "k1", true),
            Setting::select("Bar", "k2", Arc::new(StaticOptions::new(["A", "B"], "A"))).unwrap(),
        ],
    )
}

/// Keys of `sample_settings` that hold a value after initialization
pub const SEEDED_KEYS: &[&str] = &[
    "general.foo",
    "general.bar2",
    "general.baz",
    "general.info",
    "speed",
    "volume",
    "general.shouldi",
    "extra.foo",
    "extra.bar",
    "extra.baz",
    "extra.subfoo",
];
