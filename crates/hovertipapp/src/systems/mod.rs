//! # Game-System Adapters
//!
//! Each supported game system maps the logical categories (hit points, armor
//! class, spell slots, ...) onto its own actor data layout. A system is a unit
//! struct implementing [`GameSystem`]; [`system_for`] picks one by id.
//!
//! | Id | System |
//! |----|--------|
//! | `dnd5e` | [`Dnd5e`] |
//! | `pf2e` | [`Pf2e`] |
//!
//! The building blocks below ([`PathRow`], [`TraitList`], [`ConsumableItems`])
//! cover the common shapes so each system module is mostly a table of paths.

mod dnd5e;
pub mod labels;
mod pf2e;

pub use dnd5e::Dnd5e;
pub use pf2e::Pf2e;

use serde_json::Value;

use crate::error::{HovertipError, Result};
use crate::model::Actor;
use crate::source::{Category, DynamicRowSource, FixedRowSource, Icon, Row, RowSource};

/// Ids accepted by [`system_for`].
pub const SYSTEM_IDS: &[&str] = &[dnd5e::SYSTEM_ID, pf2e::SYSTEM_ID];

/// Flag that limits an actor's tooltip to its name.
pub const NAME_ONLY_FLAG: &str = "nameOnly";

pub trait GameSystem {
    fn id(&self) -> &'static str;

    /// Sources for a category, in display order. Empty if the system has no such data.
    fn sources(&self, category: Category) -> Vec<RowSource>;

    /// Whether the tooltip should show only the name for this actor.
    fn show_name_only(&self, actor: &Actor) -> bool {
        actor.flag(NAME_ONLY_FLAG)
    }
}

pub fn system_for(id: &str) -> Result<Box<dyn GameSystem>> {
    match id {
        dnd5e::SYSTEM_ID => Ok(Box::new(Dnd5e)),
        pf2e::SYSTEM_ID => Ok(Box::new(Pf2e)),
        other => Err(HovertipError::UnknownSystem(other.to_string())),
    }
}

/// A fixed row whose value sits at a path in the actor's system data.
#[derive(Debug, Clone)]
pub struct PathRow {
    label: String,
    icon: Icon,
    path: String,
}

impl PathRow {
    pub fn new(label: impl Into<String>, icon: Icon, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon,
            path: path.into(),
        }
    }
}

impl FixedRowSource for PathRow {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn icon(&self) -> Icon {
        self.icon.clone()
    }

    fn value(&self, actor: &Actor) -> Value {
        actor.lookup(&self.path).cloned().unwrap_or(Value::Null)
    }
}

/// A trait list stored as `{value: [..], custom: "a; b"}`, shown as one joined row.
#[derive(Debug, Clone)]
pub struct TraitList {
    label: String,
    icon: Icon,
    path: String,
}

impl TraitList {
    pub fn new(label: impl Into<String>, icon: Icon, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon,
            path: path.into(),
        }
    }
}

impl FixedRowSource for TraitList {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn icon(&self) -> Icon {
        self.icon.clone()
    }

    fn value(&self, actor: &Actor) -> Value {
        let Some(traits) = actor.lookup(&self.path) else {
            return Value::Null;
        };

        let mut entries: Vec<Value> = traits
            .get("value")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter(|v| v.as_str().is_some_and(|s| !s.is_empty()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(custom) = traits.get("custom").and_then(Value::as_str) {
            entries.extend(
                custom
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Value::from),
            );
        }

        if entries.is_empty() {
            Value::Null
        } else {
            Value::Array(entries)
        }
    }
}

/// One row per item of a kind, showing its quantity, ordered by item sort.
#[derive(Debug, Clone)]
pub struct ConsumableItems {
    kind: &'static str,
}

impl ConsumableItems {
    pub fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl DynamicRowSource for ConsumableItems {
    fn rows(&self, actor: &Actor) -> Vec<Row> {
        actor
            .items_of_kind(self.kind)
            .map(|item| {
                let icon = item
                    .img
                    .clone()
                    .map(Icon::Image)
                    .unwrap_or_else(|| Icon::named(labels::ICON_ITEM));
                let quantity = item.system.get("quantity").cloned().unwrap_or(Value::Null);
                Row::new(item.name.clone(), icon, quantity).with_sort(item.sort)
            })
            .collect()
    }
}
