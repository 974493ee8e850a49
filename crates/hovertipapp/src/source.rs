//! # Row Sources
//!
//! A row source is an adapter that reads one category of data (hit points,
//! spell slots, items, ...) out of one game system's actor data.
//!
//! Sources come in two explicitly tagged variants:
//!
//! - [`RowSource::Fixed`]: exactly one row whose label and icon never change;
//!   only the value is re-read per pass (e.g. "HP").
//! - [`RowSource::Dynamic`]: any number of rows computed per pass (one per
//!   spell level, one per item). Rows may carry a `sort` key.
//!
//! Rows carry the *raw* value; normalization happens in the assembler.

use serde::Serialize;
use serde_json::Value;

use crate::model::Actor;

/// What to draw in front of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Icon {
    /// Text label only.
    #[default]
    None,
    /// An icon-font glyph name, e.g. `fa-heart`.
    Named(String),
    /// Short text drawn as an icon, e.g. a spell level.
    Badge(String),
    /// An image path, e.g. an item's artwork.
    Image(String),
}

impl Icon {
    pub fn named(name: &str) -> Self {
        Icon::Named(name.to_string())
    }

    pub fn badge(text: impl Into<String>) -> Self {
        Icon::Badge(text.into())
    }
}

/// A row as produced by a source, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub icon: Icon,
    pub value: Value,
    pub sort: Option<i64>,
}

impl Row {
    pub fn new(label: impl Into<String>, icon: Icon, value: Value) -> Self {
        Self {
            label: label.into(),
            icon,
            value,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = Some(sort);
        self
    }
}

pub trait FixedRowSource {
    fn label(&self) -> String;
    fn icon(&self) -> Icon;
    fn value(&self, actor: &Actor) -> Value;
}

pub trait DynamicRowSource {
    fn rows(&self, actor: &Actor) -> Vec<Row>;
}

pub enum RowSource {
    Fixed(Box<dyn FixedRowSource>),
    Dynamic(Box<dyn DynamicRowSource>),
}

impl RowSource {
    pub fn fixed(source: impl FixedRowSource + 'static) -> Self {
        RowSource::Fixed(Box::new(source))
    }

    pub fn dynamic(source: impl DynamicRowSource + 'static) -> Self {
        RowSource::Dynamic(Box::new(source))
    }
}

impl std::fmt::Debug for RowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowSource::Fixed(source) => write!(f, "RowSource::Fixed({})", source.label()),
            RowSource::Dynamic(_) => f.write_str("RowSource::Dynamic"),
        }
    }
}

/// Data categories, in display order. Each has its own visibility setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Hp,
    Ac,
    SavingThrows,
    DamageResImmVuln,
    ConditionImmunities,
    Passives,
    Movement,
    Resources,
    SpellSlots,
    Talents,
    Items,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Hp,
        Category::Ac,
        Category::SavingThrows,
        Category::DamageResImmVuln,
        Category::ConditionImmunities,
        Category::Passives,
        Category::Movement,
        Category::Resources,
        Category::SpellSlots,
        Category::Talents,
        Category::Items,
    ];

    /// Name used in settings keys and log output.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Hp => "hp",
            Category::Ac => "ac",
            Category::SavingThrows => "saving_throws",
            Category::DamageResImmVuln => "dmg_res_vuln",
            Category::ConditionImmunities => "cond_imm",
            Category::Passives => "passives",
            Category::Movement => "movement",
            Category::Resources => "resources",
            Category::SpellSlots => "spells",
            Category::Talents => "talents",
            Category::Items => "items",
        }
    }
}
