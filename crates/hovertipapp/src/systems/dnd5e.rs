//! D&D 5th Edition data layout.

use serde_json::{json, Value};

use super::labels;
use super::{ConsumableItems, GameSystem, PathRow, TraitList};
use crate::attributes::number_like;
use crate::model::Actor;
use crate::source::{Category, DynamicRowSource, FixedRowSource, Icon, Row, RowSource};

pub(super) const SYSTEM_ID: &str = "dnd5e";

const ABILITIES: [(&str, &str); 6] = [
    ("str", "STR"),
    ("dex", "DEX"),
    ("con", "CON"),
    ("int", "INT"),
    ("wis", "WIS"),
    ("cha", "CHA"),
];

const MOVEMENT_MODES: [(&str, &str, &str); 5] = [
    ("walk", "Walk", labels::ICON_WALK),
    ("fly", "Fly", labels::ICON_FLY),
    ("swim", "Swim", labels::ICON_SWIM),
    ("climb", "Climb", labels::ICON_CLIMB),
    ("burrow", "Burrow", labels::ICON_BURROW),
];

const RESOURCES: [(&str, &str); 3] = [
    ("primary", "Primary"),
    ("secondary", "Secondary"),
    ("tertiary", "Tertiary"),
];

const PACT_SORT: i64 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct Dnd5e;

impl GameSystem for Dnd5e {
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
            Category::SavingThrows => ABILITIES
                .iter()
                .map(|&(key, abbreviation)| {
                    RowSource::fixed(PathRow::new(
                        format!("{} Save", abbreviation),
                        Icon::badge(abbreviation),
                        format!("abilities.{}.save", key),
                    ))
                })
                .collect(),
            Category::DamageResImmVuln => vec![
                RowSource::fixed(TraitList::new(
                    "Damage Resistances",
                    Icon::named(labels::ICON_RESISTANCE),
                    "traits.dr",
                )),
                RowSource::fixed(TraitList::new(
                    "Damage Immunities",
                    Icon::named(labels::ICON_IMMUNITY),
                    "traits.di",
                )),
                RowSource::fixed(TraitList::new(
                    "Damage Vulnerabilities",
                    Icon::named(labels::ICON_VULNERABILITY),
                    "traits.dv",
                )),
            ],
            Category::ConditionImmunities => vec![RowSource::fixed(TraitList::new(
                "Condition Immunities",
                Icon::named(labels::ICON_CONDITION_IMMUNITY),
                "traits.ci",
            ))],
            Category::Passives => vec![
                RowSource::fixed(PathRow::new(
                    "Passive Perception",
                    Icon::named(labels::ICON_PERCEPTION),
                    "skills.prc.passive",
                )),
                RowSource::fixed(PathRow::new(
                    "Passive Insight",
                    Icon::named(labels::ICON_INSIGHT),
                    "skills.ins.passive",
                )),
                RowSource::fixed(PathRow::new(
                    "Passive Investigation",
                    Icon::named(labels::ICON_INVESTIGATION),
                    "skills.inv.passive",
                )),
            ],
            Category::Movement => MOVEMENT_MODES
                .iter()
                .map(|&(mode, label, icon)| {
                    RowSource::fixed(Movement {
                        mode,
                        label,
                        icon,
                    })
                })
                .collect(),
            Category::Resources => vec![RowSource::dynamic(Resources)],
            Category::SpellSlots => vec![RowSource::dynamic(SpellSlots)],
            Category::Talents => vec![RowSource::dynamic(LimitedUseFeatures)],
            Category::Items => vec![RowSource::dynamic(ConsumableItems::new("consumable"))],
        }
    }
}

/// A movement speed combined with the actor's movement units. Zero speeds are omitted.
struct Movement {
    mode: &'static str,
    label: &'static str,
    icon: &'static str,
}

impl FixedRowSource for Movement {
    fn label(&self) -> String {
        self.label.to_string()
    }

    fn icon(&self) -> Icon {
        Icon::named(self.icon)
    }

    fn value(&self, actor: &Actor) -> Value {
        let Some(movement) = actor.lookup("attributes.movement") else {
            return Value::Null;
        };
        let Some(speed) = movement
            .get(self.mode)
            .filter(|speed| number_like(speed).is_some_and(|n| n != 0.0))
            .cloned()
        else {
            return Value::Null;
        };
        match movement.get("units") {
            Some(units) => json!({"value": speed, "units": units}),
            None => speed,
        }
    }
}

/// Primary, secondary and tertiary resources, labelled with their own names.
struct Resources;

impl DynamicRowSource for Resources {
    fn rows(&self, actor: &Actor) -> Vec<Row> {
        RESOURCES
            .iter()
            .enumerate()
            .filter_map(|(i, &(key, fallback))| {
                let resource = actor.lookup(&format!("resources.{}", key))?;
                let label = resource
                    .get("label")
                    .and_then(Value::as_str)
                    .filter(|l| !l.is_empty())
                    .unwrap_or(fallback);
                Some(
                    Row::new(label, Icon::named(labels::ICON_RESOURCE), resource.clone())
                        .with_sort(i as i64),
                )
            })
            .collect()
    }
}

/// Spell slots for levels 1-9 plus pact magic, skipping levels with no slots.
struct SpellSlots;

impl DynamicRowSource for SpellSlots {
    fn rows(&self, actor: &Actor) -> Vec<Row> {
        let mut rows = Vec::new();
        // PACT_SORT places pact magic after level 9.
        if let Some(pact) = slot(actor, "pact") {
            rows.push(
                Row::new(
                    labels::PACT_ABBREVIATION,
                    Icon::badge(labels::PACT_ABBREVIATION),
                    pact,
                )
                .with_sort(PACT_SORT),
            );
        }
        for level in 1..=9i64 {
            if let Some(uses) = slot(actor, &format!("spell{}", level)) {
                rows.push(
                    Row::new(level.to_string(), Icon::badge(level.to_string()), uses)
                        .with_sort(level),
                );
            }
        }
        rows
    }
}

fn slot(actor: &Actor, key: &str) -> Option<Value> {
    let uses = actor.lookup(&format!("spells.{}", key))?;
    let max = uses.get("max").and_then(Value::as_f64)?;
    (max > 0.0).then(|| uses.clone())
}

/// Features with limited uses, e.g. Second Wind or Channel Divinity.
struct LimitedUseFeatures;

impl DynamicRowSource for LimitedUseFeatures {
    fn rows(&self, actor: &Actor) -> Vec<Row> {
        actor
            .items_of_kind("feat")
            .filter_map(|item| {
                let uses = item.system.get("uses")?;
                let max = uses.get("max").and_then(number_like)?;
                if max <= 0.0 {
                    return None;
                }
                let icon = item
                    .img
                    .clone()
                    .map(Icon::Image)
                    .unwrap_or_else(|| Icon::named(labels::ICON_TALENT));
                let value = json!({
                    "value": uses.get("value").cloned().unwrap_or(Value::Null),
                    "max": max,
                });
                Some(Row::new(item.name.clone(), icon, value).with_sort(item.sort))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    fn actor() -> Actor {
        let mut actor = Actor::new("Mira");
        actor.system = json!({
            "attributes": {
                "hp": {"value": 12, "max": 20, "temp": 3},
                "ac": {"value": 16},
                "movement": {"walk": 30, "fly": 0, "units": "ft"}
            },
            "abilities": {"dex": {"save": 5}},
            "resources": {
                "primary": {"value": 2, "max": 3, "label": "Ki"},
                "secondary": {"value": 0, "max": 0, "label": ""}
            },
            "spells": {
                "spell1": {"value": 3, "max": 4},
                "spell2": {"value": 0, "max": 2},
                "spell3": {"value": 0, "max": 0},
                "pact": {"value": 1, "max": 2}
            }
        });
        actor
    }

    fn fixed_values(category: Category, actor: &Actor) -> Vec<(String, Value)> {
        Dnd5e
            .sources(category)
            .into_iter()
            .filter_map(|source| match source {
                RowSource::Fixed(s) => Some((s.label(), s.value(actor))),
                RowSource::Dynamic(_) => None,
            })
            .collect()
    }

    fn dynamic_rows(category: Category, actor: &Actor) -> Vec<Row> {
        Dnd5e
            .sources(category)
            .into_iter()
            .flat_map(|source| match source {
                RowSource::Dynamic(s) => s.rows(actor),
                RowSource::Fixed(_) => Vec::new(),
            })
            .collect()
    }

    #[test]
    fn hp_and_ac_paths() {
        let a = actor();
        assert_eq!(
            fixed_values(Category::Hp, &a),
            vec![("HP".to_string(), json!({"value": 12, "max": 20, "temp": 3}))]
        );
        assert_eq!(
            fixed_values(Category::Ac, &a),
            vec![("AC".to_string(), json!(16))]
        );
    }

    #[test]
    fn saving_throws_cover_six_abilities() {
        let values = fixed_values(Category::SavingThrows, &actor());
        assert_eq!(values.len(), 6);
        assert_eq!(values[1], ("DEX Save".to_string(), json!(5)));
        assert_eq!(values[0].1, Value::Null);
    }

    #[test]
    fn movement_includes_units_and_skips_zero_speeds() {
        let values = fixed_values(Category::Movement, &actor());
        assert_eq!(values[0], ("Walk".to_string(), json!({"value": 30, "units": "ft"})));
        assert_eq!(values[1], ("Fly".to_string(), Value::Null));
        assert_eq!(values[2].1, Value::Null);
    }

    #[test]
    fn resources_use_their_own_labels() {
        let rows = dynamic_rows(Category::Resources, &actor());
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Ki", "Secondary"]);
    }

    #[test]
    fn spell_slots_skip_empty_levels_and_sort_pact_last() {
        let mut rows = dynamic_rows(Category::SpellSlots, &actor());
        rows.sort_by_key(|r| r.sort.unwrap_or(0));
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "P"]);
    }

    #[test]
    fn talents_are_limited_use_features() {
        let mut a = actor();
        a.items = vec![
            Item {
                name: "Second Wind".into(),
                kind: "feat".into(),
                system: json!({"uses": {"value": 1, "max": "1"}}),
                ..Default::default()
            },
            Item {
                name: "Darkvision".into(),
                kind: "feat".into(),
                system: json!({"uses": {"value": null, "max": ""}}),
                ..Default::default()
            },
        ];
        let rows = dynamic_rows(Category::Talents, &a);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, json!({"value": 1, "max": 1.0}));
    }
}
