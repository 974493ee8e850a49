//! Pathfinder Second Edition data layout.
//!
//! Spell slots come from spellcasting entries rather than a fixed table: each
//! entry reports its own levels, and focus-pool entries share the actor's
//! single focus resource.

use serde_json::Value;

use super::labels;
use super::{ConsumableItems, GameSystem, PathRow};
use crate::model::{Actor, SpellLevel, SpellcastingEntry};
use crate::source::{Category, DynamicRowSource, Icon, Row, RowSource};

pub(super) const SYSTEM_ID: &str = "pf2e";

const SAVES: [(&str, &str, &str); 3] = [
    ("fortitude", "Fortitude", "FORT"),
    ("reflex", "Reflex", "REF"),
    ("will", "Will", "WILL"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Pf2e;

impl GameSystem for Pf2e {
    fn id(&self) -> &'static str {
        SYSTEM_ID
    }

    fn sources(&self, category: Category) -> Vec<RowSource> {
        match category {
            Category::Hp => vec![RowSource::fixed(PathRow::new(
                labels::HP,
                Icon::named(labels::ICON_HP),
                "attributes.hp",
            ))],
            Category::Ac => vec![RowSource::fixed(PathRow::new(
                labels::AC,
                Icon::named(labels::ICON_AC),
                "attributes.ac.value",
            ))],
            Category::SavingThrows => SAVES
                .iter()
                .map(|&(key, label, badge)| {
                    RowSource::fixed(PathRow::new(
                        label,
                        Icon::badge(badge),
                        format!("saves.{}.value", key),
                    ))
                })
                .collect(),
            Category::Passives => vec![RowSource::fixed(PathRow::new(
                "Perception",
                Icon::named(labels::ICON_PERCEPTION),
                "attributes.perception.value",
            ))],
            Category::SpellSlots => vec![RowSource::dynamic(SpellSlots)],
            Category::Items => vec![RowSource::dynamic(ConsumableItems::new("consumable"))],
            Category::DamageResImmVuln
            | Category::ConditionImmunities
            | Category::Movement
            | Category::Resources
            | Category::Talents => Vec::new(),
        }
    }
}

/// Spell slot rows across all spellcasting entries.
///
/// Entries are visited in their own sort order. The first focus-pool entry
/// contributes one focus row; later ones contribute nothing. Every other entry
/// with level data contributes one row per level that has slots.
struct SpellSlots;

impl DynamicRowSource for SpellSlots {
    fn rows(&self, actor: &Actor) -> Vec<Row> {
        let mut entries: Vec<&SpellcastingEntry> = actor.spellcasting.iter().collect();
        entries.sort_by_key(|entry| entry.sort);

        let mut rows = Vec::new();
        let mut has_focus = false;
        for entry in entries {
            if entry.is_focus_pool {
                if !has_focus {
                    has_focus = true;
                    rows.push(focus_row(actor));
                }
                continue;
            }
            if let Some(levels) = &entry.levels {
                rows.extend(levels.iter().filter_map(level_row));
            }
        }
        rows
    }
}

fn focus_row(actor: &Actor) -> Row {
    let label = labels::FOCUS_ABBREVIATION;
    let focus = actor
        .lookup("resources.focus")
        .cloned()
        .unwrap_or(Value::Null);
    Row::new(label, Icon::badge(label), focus)
}

fn level_row(level: &SpellLevel) -> Option<Row> {
    let uses = level.uses.as_ref()?;
    let has_current = uses.get("value").is_some();
    let has_slots = uses
        .get("max")
        .and_then(Value::as_f64)
        .is_some_and(|max| max > 0.0);
    if !(has_current && has_slots) {
        return None;
    }

    let label = if level.is_cantrip {
        labels::CANTRIP_ABBREVIATION.to_string()
    } else {
        level.level.to_string()
    };
    Some(Row::new(label.clone(), Icon::badge(label), uses.clone()))
}
